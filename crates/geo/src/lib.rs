//! # `oracle-geo` - 地理与时区适配器
//!
//! - `nominatim`: 基于 HTTP 的地名 → 坐标查询。
//! - `tzf`: 离线的坐标 → IANA 时区查询。
//! - `resolver`: 组合以上两者与缓存，带超时重试与 UTC 降级的时区解析器。

pub mod nominatim;
pub mod resolver;
pub mod tzf;
