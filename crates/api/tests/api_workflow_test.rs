use chrono_tz::Tz;
use oracle_api::server::{AppState, serve};
use oracle_api::types::{ApiErrorResponse, ChartResponse, HealthResponse, LuckPillarResponse};
use oracle_chart::service::ChartService;
use oracle_core::testing::FixedZoneResolver;
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

// 帮助函数：在随机端口启动测试服务器，返回地址与解析器调用计数
async fn spawn_test_server(resolver: FixedZoneResolver) -> (String, Arc<AtomicUsize>) {
    rustls::crypto::ring::default_provider().install_default().ok();

    let calls = resolver.counter();
    let state = AppState {
        chart: Arc::new(ChartService::new(Arc::new(resolver))),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        serve(listener, state).await.unwrap();
    });

    (addr, calls)
}

#[tokio::test]
async fn test_full_api_workflow() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let (base_url, calls) = spawn_test_server(FixedZoneResolver::new(Tz::Asia__Tokyo)).await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: 健康检查
    // ============================================
    let res = client.get(format!("{}/health", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let health: HealthResponse = res.json().await.unwrap();
    assert_eq!(health.status, "ok");

    // ============================================
    // Case 2: 东京样例排盘
    // ============================================
    let res = client
        .post(format!("{}/calculate-pillars", base_url))
        .json(&json!({
            "birth_datetime": "1990-03-12T15:00:00Z",
            "location": {"city": "Tokyo", "longitude": 139.7, "latitude": 35.7}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let raw: serde_json::Value = res.json().await.unwrap();

    let four = &raw["fourPillars"];
    assert_eq!(four["year_pillar"], json!({"stem": "Geng", "branch": "Wu"}));
    assert_eq!(four["month_pillar"], json!({"stem": "Ji", "branch": "Mao"}));
    assert_eq!(four["day_pillar"], json!({"stem": "Ding", "branch": "Chou"}));
    assert_eq!(four["hour_pillar"], json!({"stem": "Geng", "branch": "Zi"}));
    assert_eq!(four["timestampTST"], "1990-03-13T00:37:15.200000+09:00");
    assert!(four["warning"].is_null());

    let elements = &raw["fiveElements"];
    assert_eq!(elements["Wood"], 1.3);
    assert_eq!(elements["Fire"], 2.3);
    assert_eq!(elements["Earth"], 2.6);
    assert_eq!(elements["Metal"], 2.3);
    assert_eq!(elements["Water"], 1.6);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // ============================================
    // Case 3: 用排盘结果推排大运 (男命顺排)
    // ============================================
    let chart: ChartResponse = serde_json::from_value(raw.clone()).unwrap();
    let res = client
        .post(format!("{}/luck-pillars", base_url))
        .json(&json!({"fourPillars": raw["fourPillars"], "gender": "male"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let luck: Vec<LuckPillarResponse> = res.json().await.unwrap();
    assert_eq!(luck.len(), 8);
    assert_eq!(luck[0].start_age, 10);
    assert_eq!((luck[0].stem.as_str(), luck[0].branch.as_str()), ("Geng", "Chen"));
    assert_eq!((luck[7].stem.as_str(), luck[7].branch.as_str()), ("Ding", "Hai"));
    assert_eq!(chart.four_pillars.month_pillar.branch, "Mao");

    // ============================================
    // Case 4: snake_case 别名与未指定性别 (逆排)
    // ============================================
    let res = client
        .post(format!("{}/luck-pillars", base_url))
        .json(&json!({"four_pillars": raw["fourPillars"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let luck: Vec<LuckPillarResponse> = res.json().await.unwrap();
    assert_eq!((luck[0].stem.as_str(), luck[0].branch.as_str()), ("Wu", "Yin"));
}

#[tokio::test]
async fn test_validation_errors_return_400() {
    let (base_url, calls) = spawn_test_server(FixedZoneResolver::new(Tz::UTC)).await;
    let client = reqwest::Client::new();

    // 缺少 location
    let res = client
        .post(format!("{}/calculate-pillars", base_url))
        .json(&json!({"birth_datetime": "1990-03-12T15:00:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(!body.success);
    assert!(body.error.contains("location"), "{}", body.error);

    // 出生时间无法解析
    let res = client
        .post(format!("{}/calculate-pillars", base_url))
        .json(&json!({
            "birthDatetime": "someday",
            "location": {"city": "Tokyo", "longitude": 139.7}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(body.error.contains("birth_datetime"), "{}", body.error);

    // 请求体不是 JSON
    let res = client
        .post(format!("{}/calculate-pillars", base_url))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(!body.success);

    // 校验失败不会触发时区解析
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // 大运：干支名称非法
    let res = client
        .post(format!("{}/luck-pillars", base_url))
        .json(&json!({
            "fourPillars": {
                "year_pillar": {"stem": "Geng", "branch": "Wu"},
                "month_pillar": {"stem": "Ji", "branch": "Moon"},
                "day_pillar": {"stem": "Ding", "branch": "Chou"},
                "hour_pillar": {"stem": "Geng", "branch": "Zi"}
            }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(body.error.contains("Moon"), "{}", body.error);

    // 大运：缺少四柱
    let res = client
        .post(format!("{}/luck-pillars", base_url))
        .json(&json!({"gender": "female"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_timezone_warning_is_reported() {
    let warning = "Warning: Cannot find coordinates for city: Atlantis. Using UTC as default.";
    let (base_url, _calls) = spawn_test_server(FixedZoneResolver::fallback(warning)).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/calculate-pillars", base_url))
        .json(&json!({
            "birth_datetime": "2000-01-01 12:00",
            "location": {"city": "Atlantis", "longitude": 0.0}
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let chart: ChartResponse = res.json().await.unwrap();
    assert_eq!(chart.four_pillars.warning.as_deref(), Some(warning));
    assert_eq!(chart.four_pillars.timestamp_tst, "2000-01-01T12:00:00+00:00");
    assert_eq!(chart.four_pillars.day_pillar.stem, "Wu");
    assert_eq!(chart.four_pillars.day_pillar.branch, "Wu");
}

#[tokio::test]
async fn test_openapi_and_unknown_routes() {
    let (base_url, _calls) = spawn_test_server(FixedZoneResolver::new(Tz::UTC)).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: serde_json::Value = res.json().await.unwrap();
    assert!(doc["paths"]["/calculate-pillars"]["post"].is_object());
    assert!(doc["paths"]["/luck-pillars"]["post"].is_object());

    let res = client
        .get(format!("{}/no-such-route", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: ApiErrorResponse = res.json().await.unwrap();
    assert!(!body.success);
}
