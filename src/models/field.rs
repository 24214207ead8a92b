//! 表头识别结果
//!
//! `FieldMapping` 描述单个表头，`SchemaAnalysis` 汇总整张表

use serde::{Deserialize, Serialize};
use std::fmt;

/// 表头的语义类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    /// 学生信息（姓名、学号、班级）
    StudentInfo,
    /// 分数
    Score,
    /// 等级
    Grade,
    /// 班级排名
    RankClass,
    /// 学校排名
    RankSchool,
    /// 年级排名
    RankGrade,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            DataType::StudentInfo => "student_info",
            DataType::Score => "score",
            DataType::Grade => "grade",
            DataType::RankClass => "rank_class",
            DataType::RankSchool => "rank_school",
            DataType::RankGrade => "rank_grade",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个表头的映射结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMapping {
    /// 原始表头（未修剪）
    pub original_field: String,
    /// 目标字段，如 `name`、`score`、`rank_in_grade`
    pub mapped_field: String,
    /// 所属科目的标准名称
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub data_type: DataType,
    /// 置信度 (0.0 - 1.0)
    pub confidence: f64,
}

/// 整张表头的分析结果
///
/// 创建后不再修改；缓存命中时返回同一份数据
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaAnalysis {
    /// 按表头顺序排列的映射，重复表头保留重复映射
    pub mappings: Vec<FieldMapping>,
    /// 识别出的科目，按首次出现顺序去重
    pub subjects: Vec<String>,
    /// `mappings` 中的学生信息映射
    pub student_fields: Vec<FieldMapping>,
    /// 已识别表头数 / 表头总数；空表头列表为 0
    pub confidence: f64,
}

impl SchemaAnalysis {
    /// 是否按“宽表多科目”格式导入
    ///
    /// 科目数不少于 `min_subjects`，且置信度严格大于 `min_confidence`
    pub fn is_wide_format(&self, min_subjects: usize, min_confidence: f64) -> bool {
        self.subjects.len() >= min_subjects && self.confidence > min_confidence
    }

    /// 查找指定目标字段的学生信息映射
    pub fn student_field(&self, mapped_field: &str) -> Option<&FieldMapping> {
        self.student_fields
            .iter()
            .find(|m| m.mapped_field == mapped_field)
    }

    /// 某科目下的全部映射
    pub fn subject_mappings<'a>(
        &'a self,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a FieldMapping> + 'a {
        self.mappings
            .iter()
            .filter(move |m| m.subject.as_deref() == Some(subject))
    }
}
