//! 宽表行 -> 长表记录
//!
//! 一行学生数据按科目拆成多条 `CanonicalGradeRecord`。
//! 只有分数或等级存在的科目才会生成记录，仅有排名的科目被跳过。

use super::parse::{parse_grade, parse_rank, parse_score};
use crate::config::Config;
use crate::models::{
    CanonicalGradeRecord, CellValue, DataType, ExamContext, Row, SchemaAnalysis, Subject,
    UNKNOWN_CLASS, UNKNOWN_STUDENT,
};
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// 从一行中提取的学生身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentIdentity {
    pub student_id: String,
    pub name: String,
    pub class_name: String,
}

/// 一个科目在当前行中收集到的数据
#[derive(Debug, Default)]
struct SubjectBucket {
    subject: String,
    score: Option<f64>,
    original_grade: Option<String>,
    rank_in_class: Option<i32>,
    rank_in_grade: Option<i32>,
    source_fields: Vec<String>,
}

impl SubjectBucket {
    fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            ..Self::default()
        }
    }

    /// 同一槽位先到先得；返回是否写入
    fn accept(&mut self, data_type: DataType, cell: &CellValue) -> bool {
        match data_type {
            DataType::Score => fill(&mut self.score, || parse_score(cell)),
            DataType::Grade => fill(&mut self.original_grade, || parse_grade(cell)),
            DataType::RankClass => fill(&mut self.rank_in_class, || parse_rank(cell)),
            // 学校排名和年级排名共用 rank_in_grade
            DataType::RankSchool | DataType::RankGrade => {
                fill(&mut self.rank_in_grade, || parse_rank(cell))
            }
            DataType::StudentInfo => false,
        }
    }

    fn has_result(&self) -> bool {
        self.score.is_some() || self.original_grade.is_some()
    }
}

fn fill<T>(slot: &mut Option<T>, parse: impl FnOnce() -> Option<T>) -> bool {
    if slot.is_some() {
        return false;
    }
    *slot = parse();
    slot.is_some()
}

/// 记录转换器
#[derive(Debug, Clone)]
pub struct RecordTransformer {
    default_total_score: f64,
    subject_total_scores: BTreeMap<String, f64>,
    source_tag: String,
}

impl Default for RecordTransformer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl RecordTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            default_total_score: config.default_subject_total_score,
            subject_total_scores: config.subject_total_scores.clone(),
            source_tag: config.source_tag.clone(),
        }
    }

    /// 设置某科目的满分
    pub fn with_total_score(mut self, subject: impl Into<String>, total: f64) -> Self {
        self.subject_total_scores.insert(subject.into(), total);
        self
    }

    /// 某科目的满分，未单独配置时取默认值
    pub fn total_score_for(&self, subject: &str) -> f64 {
        self.subject_total_scores
            .get(subject)
            .copied()
            .unwrap_or(self.default_total_score)
    }

    /// 转换一行数据
    ///
    /// 格式错误的单元格直接丢弃，从不失败
    pub fn transform_row(
        &self,
        row: &Row,
        analysis: &SchemaAnalysis,
        exam: &ExamContext,
    ) -> Vec<CanonicalGradeRecord> {
        let identity = extract_identity(row, analysis);
        let buckets = group_by_subject(row, analysis);
        let converted_at = Utc::now().to_rfc3339();

        let records: Vec<_> = buckets
            .into_iter()
            .filter(|bucket| {
                let keep = bucket.has_result();
                if !keep {
                    trace!("科目 {} 无分数或等级，跳过", bucket.subject);
                }
                keep
            })
            .map(|bucket| self.build_record(bucket, &identity, exam, row.len(), &converted_at))
            .collect();

        debug!(
            "学生 {} ({}) 生成 {} 条记录",
            identity.name,
            identity.student_id,
            records.len()
        );
        records
    }

    fn build_record(
        &self,
        bucket: SubjectBucket,
        identity: &StudentIdentity,
        exam: &ExamContext,
        row_width: usize,
        converted_at: &str,
    ) -> CanonicalGradeRecord {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), Value::from(self.source_tag.as_str()));
        metadata.insert("original_row_width".to_string(), Value::from(row_width));
        metadata.insert("converted_at".to_string(), Value::from(converted_at));
        metadata.insert("source_fields".to_string(), json!(bucket.source_fields));
        if let Some(subject) = Subject::from_name(&bucket.subject) {
            metadata.insert("subject_slug".to_string(), Value::from(subject.slug()));
        }

        let subject_total_score = self.total_score_for(&bucket.subject);

        CanonicalGradeRecord {
            student_id: identity.student_id.clone(),
            name: identity.name.clone(),
            class_name: identity.class_name.clone(),
            exam_id: exam.exam_id.clone(),
            exam_title: exam.title.clone(),
            exam_type: exam.exam_type.clone(),
            exam_date: exam.date.clone(),
            subject: bucket.subject,
            score: bucket.score,
            original_grade: bucket.original_grade,
            rank_in_class: bucket.rank_in_class,
            rank_in_grade: bucket.rank_in_grade,
            subject_total_score,
            metadata,
        }
    }
}

/// 提取学生身份，同一字段取第一个非空值
///
/// 缺学号时生成临时学号，缺姓名、班级时填占位值
pub fn extract_identity(row: &Row, analysis: &SchemaAnalysis) -> StudentIdentity {
    let mut student_id = None;
    let mut name = None;
    let mut class_name = None;

    for mapping in &analysis.student_fields {
        let slot = match mapping.mapped_field.as_str() {
            "student_id" => &mut student_id,
            "name" => &mut name,
            "class_name" => &mut class_name,
            _ => continue,
        };
        if slot.is_none() {
            *slot = row
                .get(&mapping.original_field)
                .filter(|cell| cell.is_present())
                .and_then(CellValue::to_text);
        }
    }

    StudentIdentity {
        student_id: student_id.unwrap_or_else(fallback_student_id),
        name: name.unwrap_or_else(|| UNKNOWN_STUDENT.to_string()),
        class_name: class_name.unwrap_or_else(|| UNKNOWN_CLASS.to_string()),
    }
}

/// 临时学号：毫秒时间戳 + 随机后缀
pub fn fallback_student_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("temp_{}_{}", Utc::now().timestamp_millis(), suffix)
}

fn group_by_subject(row: &Row, analysis: &SchemaAnalysis) -> Vec<SubjectBucket> {
    let mut buckets: Vec<SubjectBucket> = Vec::new();

    for mapping in &analysis.mappings {
        let Some(subject) = mapping.subject.as_deref() else {
            continue;
        };
        let Some(cell) = row.get(&mapping.original_field).filter(|c| c.is_present()) else {
            continue;
        };

        let index = match buckets.iter().position(|b| b.subject == subject) {
            Some(index) => index,
            None => {
                buckets.push(SubjectBucket::new(subject));
                buckets.len() - 1
            }
        };
        let bucket = &mut buckets[index];
        if bucket.accept(mapping.data_type, cell) {
            bucket.source_fields.push(mapping.original_field.clone());
        } else {
            trace!("丢弃单元格 \"{}\" = {}", mapping.original_field, cell);
        }
    }

    buckets
}
