use anyhow::Result;

use yt_summarize::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置（config.toml 可选，环境变量优先）
    let config = Config::load("config.toml")?;

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
