//! # 出生时间解析
//!
//! 接受带 `Z` 或数字偏移的 ISO-8601 时间 (绝对时刻)，也接受不带偏移的民用时间
//! 与纯日期 (按出生地时区本地化)。解析失败一律返回指明 `birth_datetime` 的校验错误，
//! 绝不回退到当前时间。

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use oracle_core::chart::error::ChartError;

const FIELD: &str = "birth_datetime";

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const CIVIL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// # Summary
/// 已解析的出生时间。
///
/// # Invariants
/// - `Absolute` 已确定时刻，只需换算到目标时区。
/// - `Civil` 为出生地的墙上时间，需在解析出时区后本地化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthTime {
    Absolute(DateTime<FixedOffset>),
    Civil(NaiveDateTime),
}

impl BirthTime {
    /// # Summary
    /// 解析出生时间字符串。
    ///
    /// # Logic
    /// 1. 末尾的 `Z` 视为 `+00:00`。
    /// 2. 依次尝试 RFC 3339 与带偏移的 ISO 格式。
    /// 3. 再尝试不带偏移的民用时间，最后尝试纯日期 (按零点处理)。
    ///
    /// # Arguments
    /// * `raw`: 原始字符串。
    ///
    /// # Returns
    /// 成功返回 `BirthTime`，失败返回 `ChartError::Validation`。
    pub fn parse(raw: &str) -> Result<Self, ChartError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ChartError::validation(FIELD, "must not be empty"));
        }

        let normalized = match trimmed.strip_suffix(['Z', 'z']) {
            Some(head) => format!("{}+00:00", head),
            None => trimmed.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
            return Ok(BirthTime::Absolute(dt));
        }
        for fmt in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalized, fmt) {
                return Ok(BirthTime::Absolute(dt));
            }
        }
        for fmt in CIVIL_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, fmt) {
                return Ok(BirthTime::Civil(naive));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(&normalized, "%Y-%m-%d") {
            return Ok(BirthTime::Civil(date.and_time(chrono::NaiveTime::MIN)));
        }

        Err(ChartError::validation(
            FIELD,
            format!("cannot parse '{}' as an ISO-8601 date/time", raw),
        ))
    }

    /// # Summary
    /// 将出生时间落到出生地时区。
    ///
    /// # Logic
    /// 1. 绝对时刻直接换算时区。
    /// 2. 民用时间按时区本地化：夏令时重叠取较早时刻，被跳过的时刻视为非法输入。
    pub fn localize(&self, tz: Tz) -> Result<DateTime<Tz>, ChartError> {
        match self {
            BirthTime::Absolute(dt) => Ok(dt.with_timezone(&tz)),
            BirthTime::Civil(naive) => tz.from_local_datetime(naive).earliest().ok_or_else(|| {
                ChartError::validation(
                    FIELD,
                    format!("local time {} does not exist in {}", naive, tz.name()),
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_utc_suffix() {
        let parsed = BirthTime::parse("1990-03-12T15:00:00Z").unwrap();
        let BirthTime::Absolute(dt) = parsed else {
            panic!("expected absolute time");
        };
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt.hour(), 15);
    }

    #[test]
    fn test_parse_numeric_offset_without_seconds() {
        let parsed = BirthTime::parse("1990-03-12T15:00+08:00").unwrap();
        let BirthTime::Absolute(dt) = parsed else {
            panic!("expected absolute time");
        };
        assert_eq!(dt.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn test_parse_civil_forms() {
        for raw in ["1990-01-01 14:00", "1990-01-01T14:00:00", "1990-01-01T14:00"] {
            let parsed = BirthTime::parse(raw).unwrap();
            let BirthTime::Civil(naive) = parsed else {
                panic!("expected civil time for {raw}");
            };
            assert_eq!(naive.hour(), 14);
        }
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let BirthTime::Civil(naive) = BirthTime::parse("1990-01-01").unwrap() else {
            panic!("expected civil time");
        };
        assert_eq!(naive.year(), 1990);
        assert_eq!(naive.hour(), 0);
        assert_eq!(naive.minute(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage_naming_field() {
        for raw in ["", "   ", "yesterday", "1990-13-01", "1990-02-30 10:00"] {
            let err = BirthTime::parse(raw).unwrap_err();
            assert_eq!(err.field(), Some("birth_datetime"), "input {raw:?}");
        }
    }

    #[test]
    fn test_localize_civil_in_zone() {
        let parsed = BirthTime::parse("1990-03-13 00:00").unwrap();
        let local = parsed.localize(Tz::Asia__Tokyo).unwrap();
        assert_eq!(local.to_rfc3339(), "1990-03-13T00:00:00+09:00");
    }

    #[test]
    fn test_localize_skipped_local_time_is_invalid() {
        // 2021-03-14 02:30 在纽约因夏令时跳变而不存在
        let parsed = BirthTime::parse("2021-03-14 02:30").unwrap();
        let err = parsed.localize(Tz::America__New_York).unwrap_err();
        assert_eq!(err.field(), Some("birth_datetime"));
    }

    #[test]
    fn test_localize_absolute_converts_zone() {
        let parsed = BirthTime::parse("1990-03-12T15:00:00Z").unwrap();
        let local = parsed.localize(Tz::Asia__Tokyo).unwrap();
        assert_eq!(local.to_rfc3339(), "1990-03-13T00:00:00+09:00");
    }
}
