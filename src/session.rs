//! 导入会话
//!
//! 持有共享的分析缓存和记录转换器。分块只用于进度日志，
//! 不做让出、暂停或取消，这些由调用方负责。

use crate::config::Config;
use crate::mapping::{AnalysisCache, CachedAnalysis};
use crate::models::{CanonicalGradeRecord, ExamContext, Row, SchemaAnalysis};
use crate::transform::RecordTransformer;
use crate::utils::logging::{log_batch_complete, log_import_start, print_final_stats};
use std::sync::Arc;
use tracing::info;

/// 表头准备结果
#[derive(Debug, Clone)]
pub struct PreparedImport {
    pub analysis: Arc<SchemaAnalysis>,
    pub cache_hits: u64,
    /// 是否按宽表多科目格式导入
    pub wide_format: bool,
}

/// 转换统计与结果
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub records: Vec<CanonicalGradeRecord>,
    pub rows_processed: usize,
    /// 没有生成任何记录的行数
    pub rows_without_records: usize,
}

/// 导入会话
#[derive(Debug)]
pub struct ImportSession {
    config: Config,
    cache: Arc<AnalysisCache>,
    transformer: RecordTransformer,
}

impl ImportSession {
    pub fn new(config: Config) -> Self {
        Self::with_cache(config, Arc::new(AnalysisCache::new()))
    }

    /// 与其他会话或工作线程共享缓存
    pub fn with_cache(config: Config, cache: Arc<AnalysisCache>) -> Self {
        let transformer = RecordTransformer::from_config(&config);
        Self {
            config,
            cache,
            transformer,
        }
    }

    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 分析表头并判断是否为宽表
    pub fn prepare<S: AsRef<str>>(&self, headers: &[S]) -> PreparedImport {
        let CachedAnalysis {
            analysis,
            cache_hits,
        } = self.cache.analyze(headers);

        let wide_format = analysis.is_wide_format(
            self.config.wide_format_min_subjects,
            self.config.wide_format_min_confidence,
        );
        info!(
            "宽表判定: {} (科目 {} 个, 置信度 {:.2}, 缓存命中 {})",
            if wide_format { "是" } else { "否" },
            analysis.subjects.len(),
            analysis.confidence,
            cache_hits
        );

        PreparedImport {
            analysis,
            cache_hits,
            wide_format,
        }
    }

    /// 逐行转换
    pub fn transform_rows(
        &self,
        rows: &[Row],
        analysis: &SchemaAnalysis,
        exam: &ExamContext,
    ) -> ImportOutcome {
        let batch_size = self.config.batch_size.max(1);
        let total_batches = rows.len().div_ceil(batch_size);
        log_import_start(rows.len(), batch_size);

        let mut outcome = ImportOutcome::default();
        for (batch_index, batch) in rows.chunks(batch_size).enumerate() {
            let before = outcome.records.len();
            for row in batch {
                let records = self.transformer.transform_row(row, analysis, exam);
                if records.is_empty() {
                    outcome.rows_without_records += 1;
                }
                outcome.records.extend(records);
                outcome.rows_processed += 1;
            }
            log_batch_complete(
                batch_index + 1,
                total_batches,
                outcome.records.len() - before,
            );
        }

        print_final_stats(
            outcome.rows_processed,
            outcome.records.len(),
            outcome.rows_without_records,
        );
        outcome
    }
}
