use crate::error::{AppError, AppResult, FileError};
use crate::models::{ExamContext, Row};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// 导入文件：已解析的表头、数据行与考试信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportFile {
    /// 原始表头，保持表格中的列顺序
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
    pub exam: ExamContext,
}

/// 从 JSON 文件加载导入数据
///
/// 文件未给出 `headers` 时退回到第一行的列名（按字典序）
pub async fn load_import_file(path: &Path) -> AppResult<ImportFile> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path_str.clone(), e))?;

    let mut file: ImportFile = serde_json::from_str(&content).map_err(|source| {
        AppError::File(FileError::JsonParseFailed {
            path: path_str.clone(),
            source,
        })
    })?;

    if file.headers.is_empty() {
        if let Some(first) = file.rows.first() {
            tracing::warn!("导入文件 {} 未提供表头，使用首行列名", path_str);
            file.headers = first.keys().cloned().collect();
        }
    }

    tracing::info!(
        "成功加载 {}: {} 列, {} 行",
        path_str,
        file.headers.len(),
        file.rows.len()
    );

    Ok(file)
}
