//! 映射结果诊断
//!
//! 抽查转换后的记录，发现“姓名全是占位值”“没有任何分数”这类
//! 多半由表头识别错误引起的问题。只报告，不修改数据。

use crate::models::{CanonicalGradeRecord, SchemaAnalysis, Subject};
use serde::Serialize;
use tracing::{info, warn};

/// 诊断抽样的记录数
const DIAGNOSE_SAMPLE_SIZE: usize = 20;
/// 快速校验抽样的记录数
const VALIDATE_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticIssue {
    AllNull,
    AllSame,
    NoValidScores,
    LowCoverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    fn icon(self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Info => "ℹ️",
        }
    }
}

/// 一条诊断
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingDiagnostic {
    pub field: String,
    pub issue: DiagnosticIssue,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

impl MappingDiagnostic {
    fn new(
        field: &str,
        issue: DiagnosticIssue,
        severity: Severity,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self {
            field: field.to_string(),
            issue,
            severity,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

/// 诊断字段映射问题
pub fn diagnose_mapping_issues(
    records: &[CanonicalGradeRecord],
    analysis: &SchemaAnalysis,
) -> Vec<MappingDiagnostic> {
    if records.is_empty() {
        return Vec::new();
    }

    let sample = &records[..records.len().min(DIAGNOSE_SAMPLE_SIZE)];
    let mut diagnostics = Vec::new();

    if sample.iter().all(CanonicalGradeRecord::has_placeholder_name) {
        diagnostics.push(MappingDiagnostic::new(
            "name",
            DiagnosticIssue::AllSame,
            Severity::Error,
            "所有姓名都显示为\"未知学生\"，字段映射可能有误",
            "请检查表头中的姓名列名是否被正确识别",
        ));
    }

    let scored_subjects: Vec<&str> = sample
        .iter()
        .filter(|r| r.score.is_some())
        .map(|r| r.subject.as_str())
        .collect();

    if scored_subjects.is_empty() {
        diagnostics.push(MappingDiagnostic::new(
            "scores",
            DiagnosticIssue::NoValidScores,
            Severity::Error,
            "未找到任何有效的成绩数据",
            "请确认表格包含成绩列（如\"语文\"、\"数学\"等）",
        ));
    }

    let total_name = Subject::Total.name();
    let total_mapped = analysis
        .mappings
        .iter()
        .any(|m| m.mapped_field == "total_score");
    if total_mapped && !scored_subjects.contains(&total_name) {
        diagnostics.push(MappingDiagnostic::new(
            "total_score",
            DiagnosticIssue::AllNull,
            Severity::Warning,
            "总分字段映射存在但所有值为空",
            "请检查表格中的总分列名（如\"总分\"、\"总成绩\"）",
        ));
    }

    let expected = analysis.subjects.len();
    let covered = analysis
        .subjects
        .iter()
        .filter(|s| scored_subjects.contains(&s.as_str()))
        .count();
    if expected > 0 && (covered as f64) < expected as f64 * 0.5 {
        diagnostics.push(MappingDiagnostic::new(
            "subjects",
            DiagnosticIssue::LowCoverage,
            Severity::Warning,
            format!("识别到 {} 个科目，但只有 {} 个有有效数据", expected, covered),
            "部分科目的成绩列可能未被正确识别",
        ));
    }

    if sample.iter().all(CanonicalGradeRecord::has_placeholder_class) {
        diagnostics.push(MappingDiagnostic::new(
            "class_name",
            DiagnosticIssue::AllNull,
            Severity::Warning,
            "班级字段可能未正确识别",
            "请检查表头是否包含\"班级\"等字段",
        ));
    }

    if diagnostics.is_empty() {
        info!("[映射诊断] ✅ 未发现明显的映射问题");
    } else {
        warn!("[映射诊断] 发现以下问题:");
        for d in &diagnostics {
            warn!("  {} [{}] {}", d.severity.icon(), d.field, d.message);
            warn!("     建议: {}", d.suggestion);
        }
    }

    diagnostics
}

/// 快速校验结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// 快速验证映射结果是否合理：至少有一个真实姓名和一个分数
pub fn validate_mapping_results(records: &[CanonicalGradeRecord]) -> ValidationOutcome {
    if records.is_empty() {
        return ValidationOutcome {
            valid: false,
            errors: vec!["没有可验证的记录".to_string()],
        };
    }

    let sample = &records[..records.len().min(VALIDATE_SAMPLE_SIZE)];
    let mut errors = Vec::new();

    if sample.iter().all(CanonicalGradeRecord::has_placeholder_name) {
        errors.push("所有记录都缺少有效的姓名".to_string());
    }
    if sample.iter().all(|r| r.score.is_none()) {
        errors.push("所有记录都缺少有效的成绩数据".to_string());
    }

    ValidationOutcome {
        valid: errors.is_empty(),
        errors,
    }
}
