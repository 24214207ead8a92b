//! 表头识别：单列识别、整表分析、分析缓存、映射建议

pub mod analyzer;
pub mod cache;
pub mod classifier;
pub mod keywords;
pub mod suggest;

pub use analyzer::SchemaAnalyzer;
pub use cache::{AnalysisCache, CacheStats, CachedAnalysis};
pub use classifier::HeaderClassifier;
pub use suggest::{suggest_mappings, MappingIssue, MappingSuggestions};
