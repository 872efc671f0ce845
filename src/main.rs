use anyhow::Result;
use task_generator_ui::utils::logging;
use task_generator_ui::{App, Config, FormInput};
use tracing::{info, warn};

/// 用法: task_generator_ui [数量] [难度] [类型]
#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logging::init(config.verbose_logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let defaults = FormInput::default();
    let form = FormInput {
        count: args.first().cloned().unwrap_or(defaults.count),
        difficulty: args.get(1).cloned().or(defaults.difficulty),
        task_type: args.get(2).cloned().unwrap_or(defaults.task_type),
    };

    let app = App::initialize(config)?;

    let options = app.task_type_options().await;
    info!("📋 可选任务类型: {}", options.len());
    for (key, label) in &options {
        info!("   {} - {}", key, label);
    }

    match app.submit(&form).await {
        Ok(summary) => info!("✅ 共展示 {} 道题", summary.shown),
        Err(e) => warn!("⚠️ 本次提交失败: {}", e),
    }

    app.write_results_html().await?;

    Ok(())
}
