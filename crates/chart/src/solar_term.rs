//! # 节气月支判定
//!
//! 低精度平太阳模型求太阳视黄经，再以 [315°, 345°) 作为寅月区间，其余一律为卯月。
//! 这是二元简化，并非完整的十二节气月令。

use oracle_core::calendar::entity::Branch;

/// J2000.0 历元的儒略日
const J2000_JD: f64 = 2_451_545.0;

/// 寅月对应的黄经区间 [起, 止)
const YIN_START_DEG: f64 = 315.0;
const YIN_END_DEG: f64 = 345.0;

/// # Summary
/// 太阳视黄经 (度)，归一化到 [0, 360)。
///
/// # Logic
/// 1. `n = JD - 2451545.0`。
/// 2. 平黄经 `L = 280.460 + 0.9856474 n`，平近点角 `g = 357.528 + 0.9856003 n`。
/// 3. `λ = L + 1.915 sin g + 0.020 sin 2g`。
pub fn sun_longitude(jd: f64) -> f64 {
    let n = jd - J2000_JD;
    let mean_longitude = 280.460 + 0.985_647_4 * n;
    let mean_anomaly = (357.528 + 0.985_600_3 * n).to_radians();
    let lambda =
        mean_longitude + 1.915 * mean_anomaly.sin() + 0.020 * (2.0 * mean_anomaly).sin();
    lambda.rem_euclid(360.0)
}

/// # Summary
/// 按太阳黄经判定月支。
///
/// # Returns
/// 黄经落在 [315°, 345°) 时为 `Branch::Yin`，否则为 `Branch::Mao`。
pub fn month_branch(jd: f64) -> Branch {
    let lambda = sun_longitude(jd);
    if (YIN_START_DEG..YIN_END_DEG).contains(&lambda) {
        Branch::Yin
    } else {
        Branch::Mao
    }
}
