//! 记录转换：宽表行 -> 单科成绩记录

pub mod parse;
pub mod record_transformer;

pub use record_transformer::{extract_identity, RecordTransformer, StudentIdentity};
