//! # Grade Mapper
//!
//! 成绩表表头识别与宽表转长表的核心库
//!
//! ## 处理流程
//!
//! ### ① 表头识别（mapping）
//! - `HeaderClassifier` - 单个表头 -> 字段映射（学生信息 / 科目 + 数据类型）
//! - `SchemaAnalyzer` - 整组表头 -> 科目列表、学生字段、置信度
//! - `AnalysisCache` - 相同表头序列只分析一次，线程安全
//!
//! ### ② 记录转换（transform）
//! - `RecordTransformer` - 一行学生数据 -> 每科一条 `CanonicalGradeRecord`
//!
//! ### ③ 辅助能力
//! - `suggest_mappings` - 映射确认界面的建议与缺失提示
//! - `diagnostics` - 抽查转换结果，发现可疑映射
//! - `ImportSession` - 宽表判定 + 分批转换（仅日志分批，不做 I/O）
//!
//! 核心流程全部同步、无 I/O、不会失败：无法识别的表头只会降低置信度，
//! 无法解析的单元格直接丢弃。

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logger;
pub mod mapping;
pub mod models;
pub mod session;
pub mod transform;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use mapping::{
    suggest_mappings, AnalysisCache, CachedAnalysis, HeaderClassifier, MappingSuggestions,
    SchemaAnalyzer,
};
pub use models::{
    CanonicalGradeRecord, CellValue, DataType, ExamContext, FieldMapping, Row, SchemaAnalysis,
    Subject,
};
pub use session::{ImportOutcome, ImportSession, PreparedImport};
pub use transform::RecordTransformer;
