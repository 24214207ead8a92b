use anyhow::{Context, Result};
use grade_mapper::diagnostics::{diagnose_mapping_issues, validate_mapping_results};
use grade_mapper::models::load_import_file;
use grade_mapper::{logger, suggest_mappings, AppError, Config, ImportSession};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// 用法: grade_mapper <导入文件.json> [配置文件.toml]
#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .context("用法: grade_mapper <导入文件.json> [配置文件.toml]")?;

    // 加载配置
    let config = match args.next() {
        Some(path) => Config::from_toml_file(Path::new(&path))
            .with_context(|| format!("无法加载配置文件: {}", path))?,
        None => Config::from_env(),
    };

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);

    let file = load_import_file(&input)
        .await
        .with_context(|| format!("无法加载导入文件: {}", input.display()))?;

    let suggestions = suggest_mappings(&file.headers);
    for issue in &suggestions.issues {
        warn!("⚠️ {}", issue);
    }
    if !suggestions.unmapped_headers.is_empty() {
        info!("未识别的列: {}", suggestions.unmapped_headers.join(", "));
    }

    let session = ImportSession::new(config);
    let prepared = session.prepare(&file.headers);
    if !prepared.wide_format {
        warn!("⚠️ 表格不像宽表多科目格式，请确认字段映射后再导入");
    }

    let outcome = session.transform_rows(&file.rows, &prepared.analysis, &file.exam);
    diagnose_mapping_issues(&outcome.records, &prepared.analysis);
    let validation = validate_mapping_results(&outcome.records);
    for error in &validation.errors {
        warn!("❌ {}", error);
    }

    let output = serde_json::to_string_pretty(&outcome.records)?;
    match &session.config().output_file {
        Some(path) => {
            tokio::fs::write(path, output)
                .await
                .map_err(|e| AppError::file_write_failed(path.clone(), e))?;
            info!("结果已保存至: {}", path);
        }
        None => println!("{}", output),
    }

    Ok(())
}
