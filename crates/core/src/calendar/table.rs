//! # 历法常量表
//!
//! 进程级只读数据，编译期确定，可在任意线程无锁并发读取。

use crate::calendar::entity::{Element, Stem};

/// Unix 纪元 (1970-01-01 00:00 UT) 对应的儒略日
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// 日柱六十甲子锚点：1949-10-01 00:00 UT，该日为甲子日。
pub const DAY_EPOCH_JD: f64 = 2_433_190.5;

/// `DAY_EPOCH_JD` 与 `UNIX_EPOCH_JD` 之间的整日数，供整数路径计算日序
pub const DAY_EPOCH_UNIX_OFFSET_DAYS: i64 = 7_397;

/// 每日秒数
pub const SECONDS_PER_DAY: i64 = 86_400;

/// 天干五行，按 `Stem::index` 排列
pub const STEM_ELEMENTS: [Element; 10] = [
    Element::Wood,
    Element::Wood,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Water,
    Element::Water,
];

/// 地支五行，按 `Branch::index` 排列
pub const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

/// 地支藏干，按 `Branch::index` 排列
pub const HIDDEN_STEMS: [&[Stem]; 12] = [
    &[Stem::Gui],
    &[Stem::Ji, Stem::Xin, Stem::Gui],
    &[Stem::Jia, Stem::Bing, Stem::Wu],
    &[Stem::Yi],
    &[Stem::Wu, Stem::Yi, Stem::Gui],
    &[Stem::Bing, Stem::Geng, Stem::Wu],
    &[Stem::Ding, Stem::Ji],
    &[Stem::Ji, Stem::Yi, Stem::Ding],
    &[Stem::Geng, Stem::Ren, Stem::Wu],
    &[Stem::Xin],
    &[Stem::Wu, Stem::Ding, Stem::Xin],
    &[Stem::Ren, Stem::Jia],
];
