use async_trait::async_trait;
use oracle_core::config::GeocoderConfig;
use oracle_core::geo::entity::Coordinates;
use oracle_core::geo::error::GeoError;
use oracle_core::geo::port::Geocoder;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// # Summary
/// Nominatim 兼容接口的地理编码实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，单次请求超时取自配置。
/// - 请求超时映射为 `GeoError::Timeout`，其余失败映射为非瞬时错误。
#[derive(Clone)]
pub struct NominatimGeocoder {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 服务根地址，不含末尾斜杠
    base_url: String,
}

impl NominatimGeocoder {
    /// # Summary
    /// 按配置创建地理编码客户端。
    ///
    /// # Logic
    /// 1. 配置单次请求超时。
    /// 2. 设置 User-Agent (Nominatim 使用条款要求标识调用方)。
    /// 3. 初始化 reqwest 客户端。
    ///
    /// # Arguments
    /// * `config`: 地理编码配置。
    ///
    /// # Returns
    /// 成功返回实例；User-Agent 非法或客户端构建失败返回 `GeoError::Unknown`。
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeoError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let agent = reqwest::header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| GeoError::Unknown(format!("invalid user agent: {}", e)))?;
        headers.insert(reqwest::header::USER_AGENT, agent);

        let client = Client::builder()
            .timeout(config.attempt_timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| GeoError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

/// # Summary
/// Nominatim `/search` 单条结果。
///
/// # Invariants
/// - 接口以字符串返回经纬度。
#[derive(Deserialize, Debug)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

fn map_request_error(e: reqwest::Error) -> GeoError {
    if e.is_timeout() {
        GeoError::Timeout(e.to_string())
    } else {
        GeoError::Network(e.to_string())
    }
}

fn parse_degrees(raw: &str, what: &str) -> Result<f64, GeoError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeoError::Parse(format!("invalid {} '{}'", what, raw)))
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    /// # Summary
    /// 按地名查询坐标。
    ///
    /// # Logic
    /// 1. 请求 `{base_url}/search?q=..&format=json&limit=1`。
    /// 2. 空数组视为查无此地。
    /// 3. 取首条结果并解析字符串形式的经纬度。
    async fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeoError> {
        let url = format!("{}/search", self.base_url);
        debug!("Geocoding '{}' via {}", query, url);

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(map_request_error)?;

        if !resp.status().is_success() {
            return Err(GeoError::Network(format!("HTTP {}", resp.status())));
        }

        let places: Vec<NominatimPlace> = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                GeoError::Timeout(e.to_string())
            } else {
                GeoError::Parse(e.to_string())
            }
        })?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(Coordinates {
            latitude: parse_degrees(&place.lat, "latitude")?,
            longitude: parse_degrees(&place.lon, "longitude")?,
        }))
    }
}
