use crate::error::{AppError, AppResult, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 科目满分默认值
    pub default_subject_total_score: f64,
    /// 各科满分（科目标准名称 -> 满分），覆盖默认值
    pub subject_total_scores: BTreeMap<String, f64>,
    /// 写入记录元数据的来源标记
    pub source_tag: String,
    // --- 宽表判定 ---
    /// 宽表至少需要的科目数
    pub wide_format_min_subjects: usize,
    /// 宽表需要超过的置信度
    pub wide_format_min_confidence: f64,
    /// 每批转换的行数（仅影响进度日志）
    pub batch_size: usize,
    /// 输出文件；为空时写到标准输出
    pub output_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_subject_total_score: 100.0,
            subject_total_scores: BTreeMap::new(),
            source_tag: "wide_table_import".to_string(),
            wide_format_min_subjects: 2,
            wide_format_min_confidence: 0.7,
            batch_size: 500,
            output_file: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取，未设置的项使用默认值
    ///
    /// 无法解析的值记录警告后同样回退到默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            default_subject_total_score: env_or("GRADE_DEFAULT_TOTAL_SCORE", default.default_subject_total_score, "f64"),
            subject_total_scores: default.subject_total_scores,
            source_tag: std::env::var("GRADE_SOURCE_TAG").unwrap_or(default.source_tag),
            wide_format_min_subjects: env_or("GRADE_WIDE_MIN_SUBJECTS", default.wide_format_min_subjects, "usize"),
            wide_format_min_confidence: env_or("GRADE_WIDE_MIN_CONFIDENCE", default.wide_format_min_confidence, "f64"),
            batch_size: env_or("GRADE_BATCH_SIZE", default.batch_size, "usize"),
            output_file: std::env::var("GRADE_OUTPUT_FILE").ok().or(default.output_file),
            verbose_logging: env_or("VERBOSE_LOGGING", default.verbose_logging, "bool"),
        }
    }

    /// 从 TOML 文件读取，缺省项使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path_str.clone(), e))?;
        let config = Self::from_toml_str(&content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path_str,
                source,
            })
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 检查数值范围
    pub fn validate(&self) -> AppResult<()> {
        if !(self.default_subject_total_score > 0.0) {
            return Err(AppError::invalid_config(
                "default_subject_total_score",
                "满分必须大于 0",
            ));
        }
        if let Some((subject, _)) = self
            .subject_total_scores
            .iter()
            .find(|(_, total)| !(**total > 0.0))
        {
            return Err(AppError::invalid_config(
                format!("subject_total_scores.{}", subject),
                "满分必须大于 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.wide_format_min_confidence) {
            return Err(AppError::invalid_config(
                "wide_format_min_confidence",
                "置信度必须在 0 到 1 之间",
            ));
        }
        if self.batch_size == 0 {
            return Err(AppError::invalid_config("batch_size", "批大小必须大于 0"));
        }
        Ok(())
    }
}

fn env_or<T: FromStr>(var_name: &str, default: T, expected_type: &str) -> T {
    match parse_env_value(var_name, std::env::var(var_name).ok(), expected_type) {
        Ok(Some(value)) => value,
        Ok(None) => default,
        Err(e) => {
            warn!("⚠️ {}，使用默认值", e);
            default
        }
    }
}

/// 解析单个环境变量的值；未设置时返回 `Ok(None)`
pub fn parse_env_value<T: FromStr>(
    var_name: &str,
    value: Option<String>,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: expected_type.to_string(),
        })
}
