//! # `oracle-cache` - 地理编码缓存适配器

pub mod mem;
