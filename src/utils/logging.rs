/// 日志工具模块
///
/// 提供导入过程的日志格式化和输出辅助函数
use tracing::info;

/// 记录表头分析结果
///
/// # 参数
/// - `total`: 表头总数
/// - `mapped`: 已识别数
/// - `subjects`: 识别出的科目
/// - `confidence`: 整体置信度
pub fn log_analysis_summary(total: usize, mapped: usize, subjects: &[String], confidence: f64) {
    info!(
        "📋 表头分析完成: 已识别 {}/{} 列, 科目 [{}], 置信度 {}%",
        mapped,
        total,
        subjects.join(", "),
        (confidence * 100.0).round()
    );
}

/// 记录导入开始信息
///
/// # 参数
/// - `total_rows`: 数据行数
/// - `batch_size`: 每批行数
pub fn log_import_start(total_rows: usize, batch_size: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始转换成绩数据: 共 {} 行", total_rows);
    info!("📦 每批 {} 行", batch_size);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `records`: 本批生成的记录数
pub fn log_batch_complete(batch_num: usize, total_batches: usize, records: usize) {
    info!(
        "✓ 第 {}/{} 批完成: 生成 {} 条记录",
        batch_num, total_batches, records
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `rows`: 处理行数
/// - `records`: 生成记录数
/// - `empty_rows`: 未生成任何记录的行数
pub fn print_final_stats(rows: usize, records: usize, empty_rows: usize) {
    info!("{}", "=".repeat(60));
    info!("📊 转换完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 处理行数: {}", rows);
    info!("📝 生成记录: {}", records);
    info!("⚠️ 无成绩行: {}", empty_rows);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（字符数）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
