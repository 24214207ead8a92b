//! 单元格解析
//!
//! 文本按前导数字解析：“85分” -> 85，“缺考” -> 丢弃。解析失败的单元格不会变成 0。

use crate::models::CellValue;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
});

static LEADING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer pattern"));

/// 解析分数
pub fn parse_score(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => n.is_finite().then_some(*n),
        CellValue::Text(s) => LEADING_FLOAT
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .filter(|n| n.is_finite()),
        CellValue::Empty => None,
    }
}

/// 解析排名，小数部分截断
pub fn parse_rank(cell: &CellValue) -> Option<i32> {
    match cell {
        CellValue::Number(n) if n.is_finite() => {
            let truncated = n.trunc();
            (truncated >= i32::MIN as f64 && truncated <= i32::MAX as f64)
                .then_some(truncated as i32)
        }
        CellValue::Number(_) => None,
        CellValue::Text(s) => LEADING_INT
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<i32>().ok()),
        CellValue::Empty => None,
    }
}

/// 解析等级文本（修剪后非空）
pub fn parse_grade(cell: &CellValue) -> Option<String> {
    cell.to_text()
}
