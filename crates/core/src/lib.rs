//! # `oracle-core` - 领域核心
//!
//! 八字排盘系统的领域层：实体、历法常量表、端口 (Trait) 与各领域错误。
//! 本 crate 不包含任何 I/O 实现，具体适配器位于 `oracle-geo`、`oracle-cache` 等 crate。

pub mod config;

pub mod calendar {
    pub mod entity;
    pub mod table;
}

pub mod chart {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod geo {
    pub mod entity;
    pub mod error;
    pub mod port;
}

pub mod cache {
    pub mod error;
    pub mod port;
}

#[cfg(feature = "test-utils")]
pub mod testing;
