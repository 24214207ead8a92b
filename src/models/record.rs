use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// 缺失姓名时的占位值
pub const UNKNOWN_STUDENT: &str = "未知学生";
/// 缺失班级时的占位值
pub const UNKNOWN_CLASS: &str = "未知班级";

/// 考试信息（由导入表单提供）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExamContext {
    pub exam_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub exam_type: String,
    pub date: String,
}

impl ExamContext {
    pub fn new(
        exam_id: impl Into<String>,
        title: impl Into<String>,
        exam_type: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            exam_id: exam_id.into(),
            title: title.into(),
            exam_type: exam_type.into(),
            date: date.into(),
        }
    }
}

/// 长表格式的单科成绩记录
///
/// 每个（学生，有数据的科目）生成一条，交给持久化层
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalGradeRecord {
    pub student_id: String,
    pub name: String,
    pub class_name: String,

    pub exam_id: String,
    pub exam_title: String,
    pub exam_type: String,
    pub exam_date: String,

    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_grade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_in_class: Option<i32>,
    /// 年级排名；学校排名同样写入此字段
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank_in_grade: Option<i32>,
    pub subject_total_score: f64,

    /// 审计信息：来源、原始列数、转换时间等
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl CanonicalGradeRecord {
    /// 姓名是否为占位值
    pub fn has_placeholder_name(&self) -> bool {
        self.name == UNKNOWN_STUDENT
    }

    /// 班级是否为占位值
    pub fn has_placeholder_class(&self) -> bool {
        self.class_name == UNKNOWN_CLASS
    }
}
