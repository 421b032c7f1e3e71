use super::raw::{RawFlag, RawNumber};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// 以小数存储的百分比，例如 0.518 表示 51.8%
    Percent,
    /// 绝对数值，截断为整数
    Flat,
}

impl Unit {
    pub fn from_flag(flag: RawFlag) -> Self {
        if flag.resolved() {
            Unit::Percent
        } else {
            Unit::Flat
        }
    }
}

/// 解析后的展示值。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DisplayValue {
    Percent(f64),
    Flat(i64),
    #[default]
    Absent,
}

impl DisplayValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, DisplayValue::Absent)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            DisplayValue::Percent(v) => Some(v),
            DisplayValue::Flat(v) => Some(v as f64),
            DisplayValue::Absent => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            DisplayValue::Flat(v) => Some(v),
            DisplayValue::Percent(v) => Some(v.trunc() as i64),
            DisplayValue::Absent => None,
        }
    }

    /// 从存储中的数值列恢复展示值。
    pub fn from_stored(value: Option<f64>, unit: Unit) -> Self {
        match value {
            Some(v) => resolve_stored(v, unit),
            None => DisplayValue::Absent,
        }
    }
}

fn resolve_stored(v: f64, unit: Unit) -> DisplayValue {
    match unit {
        Unit::Percent => DisplayValue::Percent(v),
        Unit::Flat => DisplayValue::Flat(v.trunc() as i64),
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Percent(v) => write!(f, "{}%", v),
            DisplayValue::Flat(v) => write!(f, "{}", v),
            DisplayValue::Absent => write!(f, "-"),
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            DisplayValue::Percent(v) => serializer.serialize_f64(v),
            DisplayValue::Flat(v) => serializer.serialize_i64(v),
            DisplayValue::Absent => serializer.serialize_none(),
        }
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// 百分比：乘 100 后保留两位小数；绝对值：向零截断。
/// 缺失或非法数值返回 `Absent`，由调用方决定行级默认值。
pub fn resolve(value: RawNumber, unit: Unit) -> DisplayValue {
    let RawNumber::Value(v) = value else {
        return DisplayValue::Absent;
    };
    match unit {
        Unit::Percent => DisplayValue::Percent(round2(v * 100.0)),
        Unit::Flat => DisplayValue::Flat(v.trunc() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_scaled_and_rounded() {
        assert_eq!(
            resolve(RawNumber::Value(0.518), Unit::Percent),
            DisplayValue::Percent(51.8)
        );
        assert_eq!(
            resolve(RawNumber::Value(0.12346), Unit::Percent),
            DisplayValue::Percent(12.35)
        );
        assert_eq!(
            resolve(RawNumber::Value(0.0), Unit::Percent),
            DisplayValue::Percent(0.0)
        );
    }

    #[test]
    fn flat_truncates_toward_zero() {
        assert_eq!(
            resolve(RawNumber::Value(632.4), Unit::Flat),
            DisplayValue::Flat(632)
        );
        assert_eq!(
            resolve(RawNumber::Value(632.99), Unit::Flat),
            DisplayValue::Flat(632)
        );
        assert_eq!(
            resolve(RawNumber::Value(-3.7), Unit::Flat),
            DisplayValue::Flat(-3)
        );
    }

    #[test]
    fn percent_matches_round_of_scaled_value() {
        for v in [0.001, 0.05, 0.1, 0.333, 0.5, 0.648, 1.2, 2.5] {
            assert_eq!(resolve(RawNumber::Value(v), Unit::Percent).as_f64(), Some(round2(v * 100.0)));
        }
    }

    #[test]
    fn absent_and_malformed_do_not_panic() {
        assert!(resolve(RawNumber::Absent, Unit::Flat).is_absent());
        assert!(resolve(RawNumber::Malformed, Unit::Percent).is_absent());
    }

    #[test]
    fn missing_flag_means_flat() {
        assert_eq!(Unit::from_flag(RawFlag(None)), Unit::Flat);
        assert_eq!(Unit::from_flag(RawFlag(Some(false))), Unit::Flat);
        assert_eq!(Unit::from_flag(RawFlag(Some(true))), Unit::Percent);
        // 0.518 且无标记：不按数值大小猜测为百分比
        assert_eq!(
            resolve(RawNumber::Value(0.518), Unit::from_flag(RawFlag(None))),
            DisplayValue::Flat(0)
        );
    }

    #[test]
    fn display_forms() {
        assert_eq!(DisplayValue::Percent(51.8).to_string(), "51.8%");
        assert_eq!(DisplayValue::Flat(632).to_string(), "632");
        assert_eq!(DisplayValue::Absent.to_string(), "-");
    }

    #[test]
    fn stored_values_round_trip_unit() {
        assert_eq!(
            DisplayValue::from_stored(Some(632.0), Unit::Flat),
            DisplayValue::Flat(632)
        );
        assert_eq!(
            DisplayValue::from_stored(Some(51.8), Unit::Percent),
            DisplayValue::Percent(51.8)
        );
        assert!(DisplayValue::from_stored(None, Unit::Percent).is_absent());
    }
}
