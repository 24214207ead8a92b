use super::classifier::HeaderClassifier;
use crate::models::{DataType, SchemaAnalysis};
use crate::utils::logging::log_analysis_summary;
use tracing::warn;

/// 表头分析器
///
/// 对整组表头逐个识别并汇总；纯函数，相同输入得到相同结果
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaAnalyzer {
    classifier: HeaderClassifier,
}

impl SchemaAnalyzer {
    pub fn new() -> Self {
        Self {
            classifier: HeaderClassifier::new(),
        }
    }

    /// 分析一组表头
    ///
    /// 重复表头各自产生映射，不去重；置信度 = 已识别数 / 表头总数
    pub fn analyze<S: AsRef<str>>(&self, headers: &[S]) -> SchemaAnalysis {
        if headers.is_empty() {
            warn!("⚠️ 表头列表为空，无法识别任何字段");
            return SchemaAnalysis::default();
        }

        let mappings: Vec<_> = headers
            .iter()
            .filter_map(|header| self.classifier.classify(header.as_ref()))
            .collect();

        let mut subjects: Vec<String> = Vec::new();
        for subject in mappings.iter().filter_map(|m| m.subject.as_ref()) {
            if !subjects.contains(subject) {
                subjects.push(subject.clone());
            }
        }

        let student_fields = mappings
            .iter()
            .filter(|m| m.data_type == DataType::StudentInfo)
            .cloned()
            .collect();

        let confidence = mappings.len() as f64 / headers.len() as f64;
        log_analysis_summary(headers.len(), mappings.len(), &subjects, confidence);

        SchemaAnalysis {
            mappings,
            subjects,
            student_fields,
            confidence,
        }
    }
}
