//! 表头分析缓存
//!
//! 以表头序列的内容（区分顺序）为键。条目在会话内不淘汰。
//! TODO: 长期运行的进程需要有界 LRU；目前只在单次导入会话内使用。

use super::analyzer::SchemaAnalyzer;
use crate::models::SchemaAnalysis;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// 带缓存命中数的分析结果
#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    pub analysis: Arc<SchemaAnalysis>,
    /// 本次调用后该表头序列的累计命中次数；首次分析为 0
    pub cache_hits: u64,
}

/// 缓存统计
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_hits: u64,
    /// 命中最多的表头序列（最多 5 个）
    pub most_used: Vec<(Vec<String>, u64)>,
}

#[derive(Debug)]
struct CacheEntry {
    analysis: Arc<SchemaAnalysis>,
    hits: u64,
}

/// 线程安全的表头分析缓存
#[derive(Debug, Default)]
pub struct AnalysisCache {
    analyzer: SchemaAnalyzer,
    entries: Mutex<HashMap<Vec<String>, CacheEntry>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::with_analyzer(SchemaAnalyzer::new())
    }

    pub fn with_analyzer(analyzer: SchemaAnalyzer) -> Self {
        Self {
            analyzer,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 分析表头，命中缓存时直接返回已存结果并累加命中数
    pub fn analyze<S: AsRef<str>>(&self, headers: &[S]) -> CachedAnalysis {
        let key: Vec<String> = headers.iter().map(|h| h.as_ref().to_string()).collect();

        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        // 计算期间不持锁；并发首次分析时以先写入者为准
        let analysis = Arc::new(self.analyzer.analyze(&key));
        let mut entries = self.lock();
        match entries.get_mut(&key) {
            Some(entry) => {
                entry.hits += 1;
                CachedAnalysis {
                    analysis: Arc::clone(&entry.analysis),
                    cache_hits: entry.hits,
                }
            }
            None => {
                entries.insert(
                    key,
                    CacheEntry {
                        analysis: Arc::clone(&analysis),
                        hits: 0,
                    },
                );
                CachedAnalysis {
                    analysis,
                    cache_hits: 0,
                }
            }
        }
    }

    fn lookup(&self, key: &[String]) -> Option<CachedAnalysis> {
        let mut entries = self.lock();
        let entry = entries.get_mut(key)?;
        entry.hits += 1;
        debug!("缓存命中: {} 列表头, 累计 {} 次", key.len(), entry.hits);
        Some(CachedAnalysis {
            analysis: Arc::clone(&entry.analysis),
            cache_hits: entry.hits,
        })
    }

    /// 已缓存的表头序列数
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 清空缓存
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// 获取缓存统计信息
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        let mut most_used: Vec<(Vec<String>, u64)> = entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.hits))
            .collect();
        most_used.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        most_used.truncate(5);

        CacheStats {
            total_entries: entries.len(),
            total_hits: entries.values().map(|e| e.hits).sum(),
            most_used,
        }
    }

    // 缓存内容在持锁期间不会处于中间状态，中毒后可继续使用
    fn lock(&self) -> MutexGuard<'_, HashMap<Vec<String>, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
