//! # 大运推排
//!
//! 以月柱为起点，按年干阴阳与性别决定顺逆，每十年一步，共八步。

use oracle_core::calendar::entity::Branch;
use oracle_core::chart::entity::{Gender, LuckPillar, PillarSet};

use crate::pillars::month_stem;

/// 大运步数
pub const LUCK_STEPS: u32 = 8;
/// 每步年数
pub const YEARS_PER_STEP: u32 = 10;

/// # Summary
/// 大运方向：顺排为 `1`，逆排为 `-1`。
///
/// # Logic
/// 阳年男命、阴年女命顺排，其余逆排。未指定性别按女命处理。
pub fn luck_direction(pillars: &PillarSet, gender: Gender) -> i64 {
    let is_male = matches!(gender, Gender::Male);
    if pillars.year.stem.is_yang() == is_male {
        1
    } else {
        -1
    }
}

/// # Summary
/// 推排八步大运。
///
/// # Logic
/// 1. 第 i 步 (i = 1..=8) 地支为 `(月支 + i × 方向) mod 12`。
/// 2. 天干按月干公式由年干与该步地支推出。
/// 3. 起运年龄依次为 10, 20, ..., 80。
///
/// # Returns
/// 恰好 8 项，按起运年龄升序。
pub fn luck_pillars(pillars: &PillarSet, gender: Gender) -> Vec<LuckPillar> {
    let direction = luck_direction(pillars, gender);
    let start = i64::from(pillars.month.branch.index());
    let year_stem = pillars.year.stem;

    (1..=LUCK_STEPS)
        .map(|step| {
            let branch = Branch::from_index(start + i64::from(step) * direction);
            LuckPillar {
                start_age: step * YEARS_PER_STEP,
                stem: month_stem(year_stem, branch),
                branch,
            }
        })
        .collect()
}
