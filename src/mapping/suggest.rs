use super::analyzer::SchemaAnalyzer;
use crate::models::{DataType, SchemaAnalysis};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// 映射确认界面需要提示的问题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingIssue {
    MissingName,
    MissingClass,
    NoSubjects,
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingIssue::MissingName => write!(f, "未找到学生姓名字段"),
            MappingIssue::MissingClass => write!(f, "未找到班级字段"),
            MappingIssue::NoSubjects => write!(f, "未找到任何科目字段"),
        }
    }
}

/// 字段映射建议
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingSuggestions {
    /// 原始表头 -> 建议的目标字段
    pub suggestions: BTreeMap<String, String>,
    /// 未能识别的表头，保持原顺序
    pub unmapped_headers: Vec<String>,
    pub confidence: f64,
    pub issues: Vec<MappingIssue>,
}

impl MappingSuggestions {
    /// 基于已有分析结果生成建议
    pub fn from_analysis<S: AsRef<str>>(headers: &[S], analysis: &SchemaAnalysis) -> Self {
        let mut suggestions = BTreeMap::new();
        for mapping in &analysis.mappings {
            match mapping.data_type {
                DataType::StudentInfo => {
                    suggestions.insert(mapping.original_field.clone(), mapping.mapped_field.clone());
                }
                DataType::Score if mapping.subject.is_some() => {
                    suggestions.insert(mapping.original_field.clone(), "subject_score".to_string());
                }
                _ => {}
            }
        }

        let unmapped_headers = headers
            .iter()
            .map(|h| h.as_ref())
            .filter(|h| !analysis.mappings.iter().any(|m| m.original_field == *h))
            .map(str::to_string)
            .collect();

        let mut issues = Vec::new();
        if analysis.student_field("name").is_none() {
            issues.push(MappingIssue::MissingName);
        }
        if analysis.student_field("class_name").is_none() {
            issues.push(MappingIssue::MissingClass);
        }
        if analysis.subjects.is_empty() {
            issues.push(MappingIssue::NoSubjects);
        }

        Self {
            suggestions,
            unmapped_headers,
            confidence: analysis.confidence,
            issues,
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// 分析表头并生成字段映射建议
pub fn suggest_mappings<S: AsRef<str>>(headers: &[S]) -> MappingSuggestions {
    let analysis = SchemaAnalyzer::new().analyze(headers);
    MappingSuggestions::from_analysis(headers, &analysis)
}
