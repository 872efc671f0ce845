//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则默认 `info`；`verbose` 时本 crate 输出 `debug`。
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,task_generator_ui=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 任务生成界面启动 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🌐 生成服务: {}", config.generate_url());
    info!("{}", "=".repeat(60));
}

/// 记录一批卡片的渲染结果
///
/// # 参数
/// - `shown`: 展示的卡片数
/// - `skipped`: 因记录损坏而跳过的数量
/// - `count`: 服务端声明的数量
pub fn log_batch_rendered(shown: usize, skipped: usize, count: i64) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 渲染完成: 展示 {} 张卡片 (服务端声明 {} 道)", shown, count);
    if skipped > 0 {
        info!("⚠️ 跳过损坏记录: {}", skipped);
    }
    info!("{}", "─".repeat(60));
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
