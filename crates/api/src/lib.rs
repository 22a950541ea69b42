//! # `oracle-api` - HTTP API 网关
//!
//! 八字排盘服务的 HTTP/REST 入口。
//! 使用 `axum` 构建路由与控制器，通过 `utoipa` 自动生成 OpenAPI 3.0 Swagger 文档。
//!
//! ## 架构职责
//! - 接收排盘与大运请求，解析 JSON 请求体
//! - 调用下层 `ChartPort` 完成计算
//! - 将领域模型转换为 DTO，字段名与既有客户端契约保持一致

pub mod types;
pub mod error;
pub mod routes;
pub mod server;
