use anyhow::Result;
use training_copilot::utils::logging;
use training_copilot::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 固定配置（不读命令行 / 配置文件 / 环境变量）
    let config = Config::default();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
