use std::path::Path;
use std::sync::Arc;

use oracle_api::server::{AppState, start_server};
use oracle_cache::mem::MemGeoCache;
use oracle_chart::service::ChartService;
use oracle_geo::nominatim::NominatimGeocoder;
use oracle_geo::resolver::{RetryPolicy, TimezoneResolver};
use oracle_geo::tzf::TzfFinder;
use tracing::{info, warn};

mod settings;
mod telemetry;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 ChartService 与 HTTP 网关。
///
/// # Logic
/// 1. 加载分层配置。
/// 2. 初始化全局日志。
/// 3. 实例化基础设施层 (Geocoder、TimezoneFinder、Cache)。
/// 4. 实例化领域实现层 (TimezoneResolver、ChartService)。
/// 5. 启动 HTTP 服务，收到退出信号后返回。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 加载配置
    let config = settings::load_config(Path::new(settings::DEFAULT_CONFIG_PATH), None)?;

    // 2. 初始化日志
    let _log_guard = telemetry::init_tracing(&config.log)?;
    info!("Oracle chart service starting...");

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("TLS crypto provider was already installed");
    }

    // 3. 实例化基础设施层
    let geocoder = Arc::new(NominatimGeocoder::new(&config.geocoder)?);
    let finder = Arc::new(TzfFinder::new());
    let cache = Arc::new(MemGeoCache::new());

    // 4. 实例化领域实现层
    let resolver = Arc::new(TimezoneResolver::new(
        geocoder,
        finder,
        cache,
        RetryPolicy::from(&config.geocoder),
    ));
    let chart = Arc::new(ChartService::new(resolver));

    info!("ChartService initialized. Geocoder: {}", config.geocoder.base_url);

    // 5. 启动 HTTP 服务并等待退出信号
    let state = AppState { chart };
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
