use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 日志输出
///
/// 默认 info 级别，可通过 RUST_LOG 覆盖
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n课程处理日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量课程生成模式");
    info!("📊 最大并发数: {}", config.max_concurrent_lessons);
    info!("🧩 生成策略: {}", config.generator_mode);
    info!("📤 导出格式: {}", config.export_formats);
    info!("{}", "=".repeat(60));
}

/// 记录课程加载信息
///
/// # 参数
/// - `total`: 课程总数
/// - `max_concurrent`: 最大并发数
pub fn log_lessons_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的课程计划", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
    info!("💡 每批完成后再开始下一批\n");
}

/// 记录批次开始信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `total_batches`: 批次总数
/// - `start`: 起始课程编号
/// - `end`: 结束课程编号
/// - `total`: 课程总数
pub fn log_batch_start(
    batch_num: usize,
    total_batches: usize,
    start: usize,
    end: usize,
    total: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批课程: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `success`: 成功数量
/// - `total`: 批次总数
pub fn log_batch_complete(batch_num: usize, success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(success: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
