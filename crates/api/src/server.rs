//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use labeler_session::SessionManager;

use crate::routes::session;

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `session_manager` 在服务启动前由 DI 容器注入，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 标注会话管理器 (Facade)
    pub session_manager: Arc<SessionManager>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Candle Breakout Labeler API",
        version = "0.1.0",
        description = "K 线突破标注工具的 RESTful API。提供分页浏览、点击标注与进度保存功能。",
        license(name = "MIT")
    ),
    tags(
        (name = "会话 (Session)", description = "翻页、跳转、点击标注、保存与重新加载")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的 axum 应用路由树，包含 Swagger UI 与 CORS 中间件。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 注册会话路由并自动收集 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(session::get_session))
        .routes(routes!(session::previous_page))
        .routes(routes!(session::next_page))
        .routes(routes!(session::jump_to_page))
        .routes(routes!(session::click_candle))
        .routes(routes!(session::save_progress))
        .routes(routes!(session::reload_session))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (浏览器端图表页面可能由其他来源提供)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，测试中可传入随机端口的监听器。
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}

/// 绑定端口并启动 HTTP 监听。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8050"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("🚀 Labeler API Server listening on {}", bind_addr);
    tracing::info!("📖 Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await?;
    Ok(())
}
