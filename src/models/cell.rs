use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 表格单元格的原始值
///
/// 从 JSON 反序列化时：数字 -> `Number`，字符串 -> `Text`，null -> `Empty`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

/// 一行数据：原始表头 -> 单元格
pub type Row = BTreeMap<String, CellValue>;

impl CellValue {
    /// 单元格是否有值
    ///
    /// 只有 `Empty` 和空字符串视为缺失；数字 0 是有效值
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Number(_) => true,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Empty => false,
        }
    }

    /// 转为修剪后的文本；数字整数不带小数部分
    pub fn to_text(&self) -> Option<String> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(format_number(*n)),
            CellValue::Number(_) => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            CellValue::Empty => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Empty => Ok(()),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
