//! 单个表头的识别
//!
//! 识别顺序：学生信息 -> 科目（按固定顺序）-> 数据类型标记。
//! 一个表头同时含有多个科目关键词时，科目表中靠前者胜出；这是固定策略。

use super::keywords::{
    is_cjk, DATA_TYPE_MARKERS, RANK_MARKERS, STUDENT_INFO_EXACT, STUDENT_INFO_PATTERNS,
    SUBJECT_PATTERNS,
};
use crate::models::{DataType, FieldMapping, Subject};
use crate::utils::truncate_text;
use tracing::{debug, trace};

/// 学生信息命中时的置信度
pub const STUDENT_INFO_CONFIDENCE: f64 = 0.9;
/// 科目表头带有明确类型标记，或关键词整词命中（相等、前缀、后缀）
pub const EXPLICIT_CONFIDENCE: f64 = 0.9;
/// 关键词只在表头中间命中
pub const LOOSE_CONFIDENCE: f64 = 0.8;

/// 关键词在表头中的命中方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
    Suffix,
    Contains,
}

impl MatchKind {
    /// 整词命中
    pub fn is_full_word(self) -> bool {
        !matches!(self, MatchKind::Contains)
    }
}

/// 表头识别器
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderClassifier;

impl HeaderClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 识别单个表头
    ///
    /// 无法识别时返回 `None`，从不失败
    pub fn classify(&self, header: &str) -> Option<FieldMapping> {
        let trimmed = header.trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized = trimmed.to_lowercase();

        if let Some(mapping) = self.match_student_info(header, &normalized) {
            return Some(mapping);
        }

        let mapping = self.match_subject(header, &normalized);
        if mapping.is_none() {
            debug!("未识别表头: \"{}\"", truncate_text(trimmed, 40));
        }
        mapping
    }

    fn match_student_info(&self, header: &str, normalized: &str) -> Option<FieldMapping> {
        if RANK_MARKERS.iter().any(|m| normalized.contains(m)) {
            return None;
        }

        let compact: String = normalized
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect();
        let exact = STUDENT_INFO_EXACT.iter().find_map(|(field, keywords)| {
            keywords
                .iter()
                .find(|k| **k == compact)
                .map(|k| (*field, *k))
        });
        let (field, keyword) = exact.or_else(|| {
            STUDENT_INFO_PATTERNS.iter().find_map(|(field, keywords)| {
                keywords
                    .iter()
                    .find(|k| normalized.contains(*k))
                    .map(|k| (*field, *k))
            })
        })?;

        debug!("学生信息: \"{}\" -> {} (关键词 \"{}\")", header.trim(), field, keyword);
        Some(FieldMapping {
            original_field: header.to_string(),
            mapped_field: field.to_string(),
            subject: None,
            data_type: DataType::StudentInfo,
            confidence: STUDENT_INFO_CONFIDENCE,
        })
    }

    fn match_subject(&self, header: &str, normalized: &str) -> Option<FieldMapping> {
        let (subject, keyword, kind) = SUBJECT_PATTERNS.iter().find_map(|pattern| {
            pattern.keywords.iter().find_map(|keyword| {
                match_keyword(normalized, keyword).map(|kind| (pattern.subject, *keyword, kind))
            })
        })?;

        let marker = detect_data_type(normalized);
        let (data_type, confidence) = match marker {
            Some(data_type) => (data_type, EXPLICIT_CONFIDENCE),
            None if kind.is_full_word() => (DataType::Score, EXPLICIT_CONFIDENCE),
            None => (DataType::Score, LOOSE_CONFIDENCE),
        };
        let mapped_field = mapped_field_for(subject, data_type);

        debug!(
            "科目字段: \"{}\" -> {} {} (关键词 \"{}\", {:?}, 置信度 {:.2})",
            header.trim(),
            subject,
            data_type,
            keyword,
            kind,
            confidence
        );

        Some(FieldMapping {
            original_field: header.to_string(),
            mapped_field: mapped_field.to_string(),
            subject: Some(subject.name().to_string()),
            data_type,
            confidence,
        })
    }
}

/// 判断关键词是否命中规范化后的表头
///
/// 单字关键词要求左右都不是汉字（或表头恰好就是这个字），
/// 避免“数”命中“分数”之类的词
pub fn match_keyword(normalized: &str, keyword: &str) -> Option<MatchKind> {
    if normalized == keyword {
        return Some(MatchKind::Exact);
    }

    if keyword.chars().count() == 1 {
        for (idx, _) in normalized.match_indices(keyword) {
            let end = idx + keyword.len();
            let before = normalized[..idx].chars().next_back();
            let after = normalized[end..].chars().next();
            if before.is_some_and(is_cjk) || after.is_some_and(is_cjk) {
                trace!("单字关键词 \"{}\" 在 \"{}\" 中不独立", keyword, normalized);
                continue;
            }
            return Some(position_kind(idx, end, normalized.len()));
        }
        return None;
    }

    if normalized.starts_with(keyword) {
        Some(MatchKind::Prefix)
    } else if normalized.ends_with(keyword) {
        Some(MatchKind::Suffix)
    } else if normalized.contains(keyword) {
        Some(MatchKind::Contains)
    } else {
        None
    }
}

fn position_kind(start: usize, end: usize, len: usize) -> MatchKind {
    if start == 0 {
        MatchKind::Prefix
    } else if end == len {
        MatchKind::Suffix
    } else {
        MatchKind::Contains
    }
}

/// 按标记表顺序查找数据类型
pub fn detect_data_type(normalized: &str) -> Option<DataType> {
    DATA_TYPE_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|m| normalized.contains(m)))
        .map(|(data_type, _)| *data_type)
}

/// 数据类型 -> 目标字段
///
/// 学校排名与年级排名都映射到 `rank_in_grade`。这是沿用下来的行为，
/// 很可能并非有意为之；是否拆出 `rank_in_school` 尚未决定，改动前先改测试。
pub fn mapped_field_for(subject: Subject, data_type: DataType) -> &'static str {
    match data_type {
        DataType::StudentInfo => "student_info",
        DataType::Score if subject.is_total() => "total_score",
        DataType::Score => "score",
        DataType::Grade => "original_grade",
        DataType::RankClass => "rank_in_class",
        DataType::RankSchool | DataType::RankGrade => "rank_in_grade",
    }
}
