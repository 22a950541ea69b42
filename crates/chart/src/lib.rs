//! # `oracle-chart` - 排盘引擎
//!
//! 确定性的八字计算：真太阳时修正、儒略日换算、节气月支判定、四柱推导、
//! 五行计分与大运推排。除 `service` 调用注入的时区解析器外，全部为纯函数。
//!
//! ## 数据流
//! 出生时间 + 地点 → 时区解析 → 真太阳时 → 儒略日 → {节气判定, 直接算术} → 四柱
//! → {五行计分, 大运}

pub mod elements;
pub mod julian;
pub mod luck;
pub mod pillars;
pub mod service;
pub mod solar_term;
pub mod solar_time;
pub mod timestamp;
