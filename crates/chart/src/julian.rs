//! # 儒略日换算
//!
//! `JD = Unix 秒 / 86400 + 2440587.5`。先拆分为整日与日内秒再合成，
//! 避免大整数直接转浮点带来的精度损失。

use chrono::{DateTime, NaiveDateTime, TimeZone};
use oracle_core::calendar::table::{DAY_EPOCH_UNIX_OFFSET_DAYS, SECONDS_PER_DAY, UNIX_EPOCH_JD};
use oracle_core::chart::error::ChartError;

/// # Summary
/// 计算任意时刻的儒略日 (含小数部分)。
///
/// # Logic
/// 1. 取 Unix 秒，按欧几里得除法拆为整日数与日内秒。
/// 2. 整日数与日内秒均可无损转为 `f64`，再叠加纳秒与纪元儒略日。
///
/// # Arguments
/// * `t`: 任意时区下的时刻，只取其绝对时刻。
///
/// # Returns
/// 儒略日；整日数超出 `i32` 范围时返回内部错误。
pub fn julian_day<T: TimeZone>(t: &DateTime<T>) -> Result<f64, ChartError> {
    let secs = t.timestamp();
    let days = i32::try_from(secs.div_euclid(SECONDS_PER_DAY))
        .map_err(|_| ChartError::Internal(format!("timestamp {} out of range for Julian day", secs)))?;
    let second_of_day = i32::try_from(secs.rem_euclid(SECONDS_PER_DAY))
        .map_err(|_| ChartError::Internal(format!("timestamp {} out of range for Julian day", secs)))?;
    let fraction = (f64::from(second_of_day) + f64::from(t.timestamp_subsec_nanos()) / 1e9)
        / 86_400.0;
    Ok(UNIX_EPOCH_JD + f64::from(days) + fraction)
}

/// # Summary
/// 墙上时间相对日柱锚点的整日序号。
///
/// # Logic
/// 将墙上时间按 UT 读取，等价于 `floor(JD_local - DAY_EPOCH_JD)`，全程整数运算，
/// 因此日期在当地 (太阳时) 午夜切换。
pub fn day_number(local: &NaiveDateTime) -> i64 {
    local.and_utc().timestamp().div_euclid(SECONDS_PER_DAY) + DAY_EPOCH_UNIX_OFFSET_DAYS
}
