use anyhow::Result;
/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 通过 RUST_LOG 环境变量控制级别，默认 info
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
        "{}\n批次提交日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数
pub fn log_startup(max_concurrent: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量行为积分提交模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!("{}", "=".repeat(60));
}

/// 记录批次加载信息
///
/// # 参数
/// - `total`: 批次总数
/// - `max_concurrent`: 最大并发数
pub fn log_batches_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待提交的批次", total);
    info!("📋 将以每轮 {} 个的方式处理", max_concurrent);
    info!("💡 每轮完成后再开始下一轮\n");
}

/// 记录轮次开始信息
///
/// # 参数
/// - `wave_num`: 轮次编号
/// - `total_waves`: 轮次总数
/// - `start`: 起始批次编号
/// - `end`: 结束批次编号
/// - `total`: 批次总数
pub fn log_wave_start(wave_num: usize, total_waves: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 轮", wave_num, total_waves);
    info!("📄 本轮批次: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录轮次完成信息
///
/// # 参数
/// - `wave_num`: 轮次编号
/// - `success`: 成功数量
/// - `total`: 本轮总数
pub fn log_wave_complete(wave_num: usize, success: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 轮完成: 成功 {}/{}", wave_num, success, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功批次数
/// - `failed`: 失败批次数
/// - `total`: 批次总数
/// - `students_awarded`: 累计加分学生数
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(
    success: usize,
    failed: usize,
    total: usize,
    students_awarded: usize,
    log_file_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部提交完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功批次: {}/{}", success, total);
    info!("❌ 失败批次: {}", failed);
    info!("🎓 累计加分学生: {} 人次", students_awarded);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("课堂表现优秀", 3), "课堂表...");
        assert_eq!(truncate_text("短", 3), "短");
    }
}
