use std::sync::Arc;

use labeler_api::server::{AppState, start_server};
use labeler_session::SessionManager;
use labeler_store::FileDatasetStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化具体的存储实现并通过 Arc<dyn Trait> 注入到 SessionManager。
///
/// # Logic
/// 1. 初始化全局日志。
/// 2. 加载配置。
/// 3. 实例化基础设施层（文件存储）。
/// 4. 加载数据集并构造应用服务层（SessionManager），失败时直接退出。
/// 5. 启动 HTTP 服务，直到收到退出信号。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 初始化日志，guard 必须存活到进程结束
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .init();
    info!("Candle breakout labeler starting...");

    // 2. 加载配置
    let config_path = std::env::var(settings::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| settings::DEFAULT_CONFIG_PATH.to_string());
    let config = settings::load_config(&config_path)?;

    // 3. 实例化基础设施层
    let store = Arc::new(FileDatasetStore::from_config(&config.data));

    // 4. 构造应用服务层（注入 Core Trait 抽象）
    let session_manager = SessionManager::start(store, config.data.page_size).await?;
    let state = AppState { session_manager };

    // 5. 启动服务并等待外部退出信号
    let bind_addr = config.bind_addr();
    tokio::select! {
        served = start_server(state, &bind_addr) => served?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received. Exiting...");
        }
    }

    Ok(())
}
