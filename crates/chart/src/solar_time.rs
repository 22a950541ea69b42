//! # 真太阳时修正
//!
//! 按经度对区时做线性修正：`修正量 = 经度 / 15 × 4 分钟`。
//! 不含时差 (equation of time) 修正，是有意保留的简化模型。

use chrono::{DateTime, FixedOffset, TimeDelta};
use chrono_tz::Tz;
use oracle_core::chart::error::ChartError;

/// 每度经度对应的修正微秒数：(1 / 15) × 4 分钟 = 16 秒
const MICROS_PER_DEGREE: f64 = 16_000_000.0;

/// # Summary
/// 计算经度对应的真太阳时修正量，精确到微秒。
///
/// # Arguments
/// * `longitude`: 经度 (度)，东经为正。
///
/// # Returns
/// 修正量；经度非有限值或超出 [-180, 180] 时返回校验错误。
pub fn solar_offset(longitude: f64) -> Result<TimeDelta, ChartError> {
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(ChartError::validation(
            "location.longitude",
            format!("cannot derive solar time offset from longitude {}", longitude),
        ));
    }
    // |longitude| <= 180 保证结果不超过 2.88e9 微秒
    #[allow(clippy::cast_possible_truncation)]
    let micros = (longitude * MICROS_PER_DEGREE).round() as i64;
    Ok(TimeDelta::microseconds(micros))
}

/// # Summary
/// 将已本地化的区时修正为视太阳时。
///
/// # Logic
/// 1. 由经度得到修正量。
/// 2. 固定出生时刻的 UTC 偏移后再叠加修正量，墙上时间整体平移，
///    即使修正区间内发生夏令时切换也不会跳变一小时。
///
/// # Arguments
/// * `local`: 出生地时区下的区时。
/// * `longitude`: 出生地经度。
///
/// # Returns
/// 修正后的时间，UTC 偏移与出生时刻的偏移相同。
pub fn apparent_solar_time(local: &DateTime<Tz>, longitude: f64) -> Result<DateTime<FixedOffset>, ChartError> {
    let offset = solar_offset(longitude)?;
    local.fixed_offset().checked_add_signed(offset).ok_or_else(|| {
        ChartError::Internal(format!(
            "solar time correction overflows for {} at longitude {}",
            local, longitude
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_offset_is_four_minutes_per_fifteen_degrees() {
        assert_eq!(solar_offset(15.0).unwrap(), TimeDelta::minutes(4));
        assert_eq!(solar_offset(-15.0).unwrap(), TimeDelta::minutes(-4));
        assert_eq!(solar_offset(0.0).unwrap(), TimeDelta::zero());
        assert_eq!(solar_offset(180.0).unwrap(), TimeDelta::minutes(48));
    }

    #[test]
    fn test_offset_rounds_to_microseconds() {
        // 139.7 / 15 × 4 分钟 = 37 分 15.2 秒
        assert_eq!(
            solar_offset(139.7).unwrap(),
            TimeDelta::milliseconds(37 * 60_000 + 15_200)
        );
    }

    #[test]
    fn test_offset_rejects_non_finite() {
        assert!(solar_offset(f64::NAN).is_err());
        assert!(solar_offset(f64::INFINITY).is_err());
        assert!(solar_offset(200.0).is_err());
    }

    #[test]
    fn test_apparent_solar_time_keeps_zone() {
        let local = Tz::Asia__Tokyo.with_ymd_and_hms(1990, 3, 13, 0, 0, 0).unwrap();
        let solar = apparent_solar_time(&local, 139.7).unwrap();
        assert_eq!(solar.to_rfc3339(), "1990-03-13T00:37:15.200+09:00");
    }

    #[test]
    fn test_western_longitude_moves_backwards() {
        let local = Tz::UTC.with_ymd_and_hms(2000, 1, 1, 0, 10, 0).unwrap();
        let solar = apparent_solar_time(&local, -74.0).unwrap();
        // -74 × 16 秒 = -19 分 44 秒
        assert_eq!(solar.to_rfc3339(), "1999-12-31T23:50:16+00:00");
    }

    #[test]
    fn test_offset_kept_across_dst_switch() {
        // 柏林 2021-03-28 02:00 CET 跳到 03:00 CEST，修正量 3 分 34.4 秒跨过切换点
        let local = Tz::Europe__Berlin.with_ymd_and_hms(2021, 3, 28, 1, 58, 0).unwrap();
        let solar = apparent_solar_time(&local, 13.4).unwrap();
        assert_eq!(solar.to_rfc3339(), "2021-03-28T02:01:34.400+01:00");
    }
}
