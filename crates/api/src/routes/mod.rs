//! # 路由控制器

pub mod chart;
pub mod health;
pub mod luck;
