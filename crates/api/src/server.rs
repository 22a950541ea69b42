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

use oracle_core::chart::port::ChartPort;

use crate::routes::{chart, health, luck};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `chart` 在服务启动前由 DI 容器注入，生命周期与进程等同。
#[derive(Clone)]
pub struct AppState {
    /// 排盘服务端口
    pub chart: Arc<dyn ChartPort>,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oracle 八字排盘 API",
        version = "0.1.0",
        description = "由出生时间与地点计算四柱、五行分布与大运。",
        license(name = "MIT")
    ),
    tags(
        (name = "排盘 (Chart)", description = "四柱、五行与大运计算"),
        (name = "系统 (System)", description = "健康检查")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// # Summary
/// 构建完整的 axum 应用路由树 (含 Swagger UI 与 CORS)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
pub fn build_router(state: AppState) -> Router {
    // 1. 合并所有路由与自动收集的 OpenAPI Doc
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(chart::calculate_pillars))
        .routes(routes!(luck::luck_pillars))
        .routes(routes!(health::health))
        .with_state(state)
        .split_for_parts();

    // 2. 配置 CORS (允许所有来源)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 3. 合并 Swagger UI 路由并应用中间件
    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .fallback(health::not_found)
        .layer(cors)
}

/// 在已绑定的监听器上提供服务，直到连接循环退出。
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}

/// 绑定地址并启动 HTTP 服务。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
///
/// # Returns
/// TCP 绑定失败或服务异常退出时返回错误。
pub async fn start_server(state: AppState, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;

    tracing::info!("Oracle API Server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(listener, state).await?;

    Ok(())
}
