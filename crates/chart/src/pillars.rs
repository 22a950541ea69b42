//! # 四柱推导
//!
//! 全部为纯函数，输入为真太阳时修正后的当地时间。

use chrono::{DateTime, Datelike, FixedOffset, NaiveDateTime, Timelike};
use oracle_core::calendar::entity::{Branch, Stem, StemBranch};
use oracle_core::chart::entity::{FourPillars, PillarSet};
use oracle_core::chart::error::ChartError;

use crate::julian::{day_number, julian_day};
use crate::solar_term::month_branch;

/// 公元 4 年为甲子年
const YEAR_CYCLE_OFFSET: i64 = 4;

/// # Summary
/// 年柱：`(year - 4)` 同时决定天干与地支。
///
/// # Invariants
/// - 只取公历年份，不以立春分界。
pub fn year_pillar(year: i32) -> StemBranch {
    StemBranch::from_cycle(i64::from(year) - YEAR_CYCLE_OFFSET)
}

/// # Summary
/// 由年干与月支推月干：`(年干序号 × 2 + 月支序号) mod 10`。
///
/// 大运各步的天干沿用同一公式。
pub fn month_stem(year_stem: Stem, branch: Branch) -> Stem {
    Stem::from_index(i64::from(year_stem.index()) * 2 + i64::from(branch.index()))
}

/// # Summary
/// 月柱：月支由节气判定，月干由年干推导。
///
/// # Arguments
/// * `year_stem`: 年柱天干。
/// * `jd`: 真太阳时对应的儒略日。
pub fn month_pillar(year_stem: Stem, jd: f64) -> StemBranch {
    let branch = month_branch(jd);
    StemBranch::new(month_stem(year_stem, branch), branch)
}

/// # Summary
/// 日柱：相对 1949-10-01 甲子日的整日序号，取六十甲子。
pub fn day_pillar(local: &NaiveDateTime) -> StemBranch {
    StemBranch::from_cycle(day_number(local))
}

/// # Summary
/// 时支：`((hour + 1) / 2) mod 12`，23 点起即为子时。
pub fn hour_branch(hour: u32) -> Branch {
    Branch::from_index(i64::from((hour + 1) / 2))
}

/// # Summary
/// 时柱：时支查表，时干 `(日干序号 × 2 + 时支序号) mod 10`。
pub fn hour_pillar(day_stem: Stem, hour: u32) -> StemBranch {
    let branch = hour_branch(hour);
    let stem = Stem::from_index(i64::from(day_stem.index()) * 2 + i64::from(branch.index()));
    StemBranch::new(stem, branch)
}

/// # Summary
/// 由真太阳时推出完整四柱。
///
/// # Logic
/// 1. 年柱取太阳时的公历年。
/// 2. 月柱在太阳时对应的绝对时刻上判定节气。
/// 3. 日柱、时柱读取太阳时的墙上时间。
///
/// # Arguments
/// * `solar`: 真太阳时。
/// * `warning`: 时区解析阶段的告警，原样带入结果。
///
/// # Returns
/// 不可变的 `FourPillars`。
pub fn four_pillars(solar: &DateTime<FixedOffset>, warning: Option<String>) -> Result<FourPillars, ChartError> {
    let wall_clock = solar.naive_local();
    let jd = julian_day(solar)?;

    let year = year_pillar(wall_clock.year());
    let month = month_pillar(year.stem, jd);
    let day = day_pillar(&wall_clock);
    let hour = hour_pillar(day.stem, wall_clock.hour());

    Ok(FourPillars::new(
        PillarSet {
            year,
            month,
            day,
            hour,
        },
        *solar,
        warning,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_year_pillar_known_years() {
        assert_eq!(year_pillar(1984), StemBranch::new(Stem::Jia, Branch::Zi));
        assert_eq!(year_pillar(1990), StemBranch::new(Stem::Geng, Branch::Wu));
        assert_eq!(year_pillar(2024), StemBranch::new(Stem::Jia, Branch::Chen));
        assert_eq!(year_pillar(3), StemBranch::new(Stem::Gui, Branch::Hai));
    }

    #[test]
    fn test_month_stem_follows_year_stem() {
        // 甲、己年寅月为丙寅
        assert_eq!(month_stem(Stem::Jia, Branch::Yin), Stem::Bing);
        assert_eq!(month_stem(Stem::Ji, Branch::Yin), Stem::Bing);
        assert_eq!(month_stem(Stem::Geng, Branch::Mao), Stem::Ji);
    }

    #[test]
    fn test_day_pillar_reference_dates() {
        assert_eq!(day_pillar(&midnight(1949, 10, 1)), StemBranch::new(Stem::Jia, Branch::Zi));
        assert_eq!(day_pillar(&midnight(2000, 1, 1)), StemBranch::new(Stem::Wu, Branch::Wu));
        assert_eq!(day_pillar(&midnight(1900, 1, 1)), StemBranch::new(Stem::Jia, Branch::Xu));
    }

    #[test]
    fn test_hour_branch_table() {
        assert_eq!(hour_branch(23), Branch::Zi);
        assert_eq!(hour_branch(0), Branch::Zi);
        assert_eq!(hour_branch(1), Branch::Chou);
        assert_eq!(hour_branch(2), Branch::Chou);
        assert_eq!(hour_branch(11), Branch::Wu);
        assert_eq!(hour_branch(12), Branch::Wu);
        assert_eq!(hour_branch(13), Branch::Wei);
        assert_eq!(hour_branch(22), Branch::Hai);
    }

    #[test]
    fn test_hour_stem_from_day_stem() {
        // 甲日子时为甲子，乙日子时为丙子
        assert_eq!(hour_pillar(Stem::Jia, 0), StemBranch::new(Stem::Jia, Branch::Zi));
        assert_eq!(hour_pillar(Stem::Yi, 0), StemBranch::new(Stem::Bing, Branch::Zi));
        assert_eq!(hour_pillar(Stem::Ding, 0), StemBranch::new(Stem::Geng, Branch::Zi));
    }
}
