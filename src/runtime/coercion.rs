//! Coercion rules between variant types
//!
//! Every built-in function converts its parameters through [`Coercion`], and
//! comparisons and additions pick a common representation for both operands
//! here, so aggregates like `Min`/`Max` order values exactly like the
//! comparison operators do.
//!
//! Dates and time spans convert to and from 100 ns tick counts. DateTime
//! ticks are counted from 0001-01-01T00:00:00.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

use super::variant::{Variant, VariantType};
use crate::error::{Error, Result};

/// Ticks in one microsecond
pub const TICKS_PER_MICROSECOND: i64 = 10;
/// Ticks in one millisecond
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Ticks in one second
pub const TICKS_PER_SECOND: i64 = 10_000_000;
/// Ticks in one minute
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Ticks in one hour
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Ticks in one day
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date and time for a tick count, `None` when out of range
pub fn date_time_from_ticks(ticks: i64) -> Option<NaiveDateTime> {
    if ticks < 0 {
        return None;
    }
    let days = i32::try_from(ticks / TICKS_PER_DAY + 1).ok()?;
    let rest = ticks % TICKS_PER_DAY;
    let date = NaiveDate::from_num_days_from_ce_opt(days)?;
    let seconds = u32::try_from(rest / TICKS_PER_SECOND).ok()?;
    let nanos = u32::try_from((rest % TICKS_PER_SECOND) * 100).ok()?;
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)?;
    Some(date.and_time(time))
}

/// Tick count of a date and time, saturating far outside years 1..=9999
pub fn date_time_ticks(dt: &NaiveDateTime) -> i64 {
    let days = i64::from(dt.date().num_days_from_ce()) - 1;
    let seconds = i64::from(dt.time().num_seconds_from_midnight());
    let nanos = i64::from(dt.time().nanosecond());
    days.saturating_mul(TICKS_PER_DAY)
        .saturating_add(seconds * TICKS_PER_SECOND + nanos / 100)
}

/// Time span for a tick count
pub fn time_span_from_ticks(ticks: i64) -> TimeDelta {
    TimeDelta::microseconds(ticks / TICKS_PER_MICROSECOND)
        + TimeDelta::nanoseconds((ticks % TICKS_PER_MICROSECOND) * 100)
}

/// Tick count of a time span, truncated toward zero
pub fn time_span_ticks(ts: &TimeDelta) -> i64 {
    ts.num_seconds()
        .saturating_mul(TICKS_PER_SECOND)
        .saturating_add(i64::from(ts.subsec_nanos()) / 100)
}

/// `YYYY-MM-DDThh:mm:ss` with a fraction only when non-zero
pub fn format_date_time(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// `[-][d.]hh:mm:ss[.fffffff]`
pub fn format_time_span(ts: &TimeDelta) -> String {
    let ticks = time_span_ticks(ts);
    let sign = if ticks < 0 { "-" } else { "" };
    let ticks = ticks.unsigned_abs();

    let day = TICKS_PER_DAY as u64;
    let hour = TICKS_PER_HOUR as u64;
    let minute = TICKS_PER_MINUTE as u64;
    let second = TICKS_PER_SECOND as u64;

    let days = ticks / day;
    let hours = ticks % day / hour;
    let minutes = ticks % hour / minute;
    let seconds = ticks % minute / second;
    let fraction = ticks % second;

    let mut text = String::from(sign);
    if days > 0 {
        text.push_str(&format!("{}.", days));
    }
    text.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if fraction > 0 {
        text.push_str(&format!(".{:07}", fraction));
    }
    text
}

/// Parses `YYYY-MM-DD`, `YYYY-MM-DD(T| )hh:mm[:ss[.f]]` or RFC 3339
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Parses `[-]d`, or `[-][d.]hh:mm[:ss[.fffffff]]`
pub fn parse_time_span(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let parts: Vec<&str> = body.split(':').collect();
    let ticks = match parts.as_slice() {
        [days] => parse_unsigned(days)?.checked_mul(TICKS_PER_DAY)?,
        [first, minutes] => clock_ticks(first, minutes, None)?,
        [first, minutes, seconds] => clock_ticks(first, minutes, Some(seconds))?,
        _ => return None,
    };

    Some(time_span_from_ticks(if negative { -ticks } else { ticks }))
}

fn clock_ticks(first: &str, minutes: &str, seconds: Option<&str>) -> Option<i64> {
    let (days, hours) = match first.split_once('.') {
        Some((days, hours)) => (parse_unsigned(days)?, parse_unsigned(hours)?),
        None => (0, parse_unsigned(first)?),
    };
    let minutes = parse_unsigned(minutes)?;
    let (seconds, fraction) = match seconds {
        Some(text) => match text.split_once('.') {
            Some((whole, fraction)) => (parse_unsigned(whole)?, parse_fraction(fraction)?),
            None => (parse_unsigned(text)?, 0),
        },
        None => (0, 0),
    };
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    days.checked_mul(TICKS_PER_DAY)?.checked_add(
        hours * TICKS_PER_HOUR + minutes * TICKS_PER_MINUTE + seconds * TICKS_PER_SECOND + fraction,
    )
}

fn parse_unsigned(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Up to seven fractional digits, as ticks
fn parse_fraction(text: &str) -> Option<i64> {
    if text.len() > 7 {
        return None;
    }
    let value = parse_unsigned(text)?;
    Some(value * 10_i64.pow(7 - text.len() as u32))
}

fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

fn float_to_i64(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

fn conversion_error(value: &Variant, to: VariantType) -> Error {
    Error::InvalidConversion {
        from: value.type_name().to_string(),
        to: to.name().to_string(),
        value: value.to_string(),
    }
}

/// Common representation two operands are compared in
fn comparison_type(left: VariantType, right: VariantType) -> Option<VariantType> {
    use VariantType::*;

    if left == Array || right == Array {
        return None;
    }
    if left == DateTime || right == DateTime {
        return Some(DateTime);
    }
    if left == TimeSpan || right == TimeSpan {
        return Some(TimeSpan);
    }
    if left.is_float() || right.is_float() {
        return Some(Float64);
    }
    match (left, right) {
        (Boolean, Boolean) | (Boolean, String) | (String, Boolean) => Some(Boolean),
        (String, String) => Some(String),
        (String, _) | (_, String) => Some(Float64),
        _ => Some(Int64),
    }
}

fn is_arithmetic(value: &Variant) -> bool {
    value.is_numeric() || matches!(value, Variant::Boolean(_))
}

/// Conversion, comparison and addition rules shared by all functions
#[derive(Debug, Clone, Copy, Default)]
pub struct Coercion;

impl Coercion {
    /// Creates the standard coercion engine
    pub fn new() -> Self {
        Coercion
    }

    /// Converts `value` to the `target` type
    pub fn convert(&self, value: &Variant, target: VariantType) -> Result<Variant> {
        Ok(match target {
            VariantType::Null => Variant::Null,
            VariantType::Int32 => Variant::Int32(self.to_i32(value)?),
            VariantType::Int64 => Variant::Int64(self.to_i64(value)?),
            VariantType::Float32 => Variant::Float32(self.to_f32(value)?),
            VariantType::Float64 => Variant::Float64(self.to_f64(value)?),
            VariantType::String => Variant::String(self.to_string(value)),
            VariantType::Boolean => Variant::Boolean(self.to_bool(value)?),
            VariantType::DateTime => Variant::DateTime(self.to_date_time(value)?),
            VariantType::TimeSpan => Variant::TimeSpan(self.to_time_span(value)?),
            VariantType::Array => Variant::Array(self.to_array(value)),
        })
    }

    /// 32-bit integer; floats truncate toward zero, out of range fails
    pub fn to_i32(&self, value: &Variant) -> Result<i32> {
        self.to_i64(value)
            .ok()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| conversion_error(value, VariantType::Int32))
    }

    /// 64-bit integer; floats truncate toward zero, dates give ticks
    pub fn to_i64(&self, value: &Variant) -> Result<i64> {
        let converted = match value {
            Variant::Null => Some(0),
            Variant::Int32(n) => Some(i64::from(*n)),
            Variant::Int64(n) => Some(*n),
            Variant::Float32(f) => float_to_i64(f64::from(*f)),
            Variant::Float64(f) => float_to_i64(*f),
            Variant::Boolean(b) => Some(i64::from(*b)),
            Variant::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_i64))
            }
            Variant::DateTime(dt) => Some(date_time_ticks(dt)),
            Variant::TimeSpan(ts) => Some(time_span_ticks(ts)),
            Variant::Array(_) => None,
        };
        converted.ok_or_else(|| conversion_error(value, VariantType::Int64))
    }

    /// 32-bit float; finite values beyond the `f32` range fail
    pub fn to_f32(&self, value: &Variant) -> Result<f32> {
        if let Variant::Float32(f) = value {
            return Ok(*f);
        }
        let f = self
            .to_f64(value)
            .map_err(|_| conversion_error(value, VariantType::Float32))?;
        if f.is_finite() && f.abs() > f64::from(f32::MAX) {
            return Err(conversion_error(value, VariantType::Float32));
        }
        Ok(f as f32)
    }

    /// 64-bit float; dates give ticks
    pub fn to_f64(&self, value: &Variant) -> Result<f64> {
        let converted = match value {
            Variant::Null => Some(0.0),
            Variant::Int32(n) => Some(f64::from(*n)),
            Variant::Int64(n) => Some(*n as f64),
            Variant::Float32(f) => Some(f64::from(*f)),
            Variant::Float64(f) => Some(*f),
            Variant::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Variant::String(s) => s.trim().parse::<f64>().ok(),
            Variant::DateTime(dt) => Some(date_time_ticks(dt) as f64),
            Variant::TimeSpan(ts) => Some(time_span_ticks(ts) as f64),
            Variant::Array(_) => None,
        };
        converted.ok_or_else(|| conversion_error(value, VariantType::Float64))
    }

    /// Numbers and time spans are true when non-zero; strings must be
    /// `true`/`false` (any case) or `1`/`0`
    pub fn to_bool(&self, value: &Variant) -> Result<bool> {
        let converted = match value {
            Variant::Null => Some(false),
            Variant::Boolean(b) => Some(*b),
            Variant::Int32(n) => Some(*n != 0),
            Variant::Int64(n) => Some(*n != 0),
            Variant::Float32(f) => Some(*f != 0.0),
            Variant::Float64(f) => Some(*f != 0.0),
            Variant::String(s) => parse_bool(s),
            Variant::TimeSpan(ts) => Some(!ts.is_zero()),
            Variant::DateTime(_) | Variant::Array(_) => None,
        };
        converted.ok_or_else(|| conversion_error(value, VariantType::Boolean))
    }

    /// Canonical text; never fails
    pub fn to_string(&self, value: &Variant) -> String {
        value.to_string()
    }

    /// Date and time from a date, a tick count or ISO-like text
    pub fn to_date_time(&self, value: &Variant) -> Result<NaiveDateTime> {
        let converted = match value {
            Variant::DateTime(dt) => Some(*dt),
            Variant::Null => date_time_from_ticks(0),
            Variant::Int32(_) | Variant::Int64(_) | Variant::Float32(_) | Variant::Float64(_) => {
                self.to_i64(value).ok().and_then(date_time_from_ticks)
            }
            Variant::String(s) => parse_date_time(s),
            Variant::Boolean(_) | Variant::TimeSpan(_) | Variant::Array(_) => None,
        };
        converted.ok_or_else(|| conversion_error(value, VariantType::DateTime))
    }

    /// Time span from a span, a tick count or `[-][d.]hh:mm[:ss[.f]]` text
    pub fn to_time_span(&self, value: &Variant) -> Result<TimeDelta> {
        let converted = match value {
            Variant::TimeSpan(ts) => Some(*ts),
            Variant::Null => Some(TimeDelta::zero()),
            Variant::Int32(_) | Variant::Int64(_) | Variant::Float32(_) | Variant::Float64(_) => {
                self.to_i64(value).ok().map(time_span_from_ticks)
            }
            Variant::String(s) => parse_time_span(s),
            Variant::Boolean(_) | Variant::DateTime(_) | Variant::Array(_) => None,
        };
        converted.ok_or_else(|| conversion_error(value, VariantType::TimeSpan))
    }

    /// Arrays as-is, Null as the empty array, anything else as a one-element array
    pub fn to_array(&self, value: &Variant) -> Arc<Vec<Variant>> {
        match value {
            Variant::Array(items) => Arc::clone(items),
            Variant::Null => Arc::new(Vec::new()),
            other => Arc::new(vec![other.clone()]),
        }
    }

    /// Orders two values after converting both to a common type
    ///
    /// Null sorts before everything. Strings compare ordinally with strings
    /// and numerically with numbers. Arrays compare element by element.
    pub fn compare(&self, left: &Variant, right: &Variant) -> Result<Ordering> {
        match (left, right) {
            (Variant::Null, Variant::Null) => return Ok(Ordering::Equal),
            (Variant::Null, _) => return Ok(Ordering::Less),
            (_, Variant::Null) => return Ok(Ordering::Greater),
            (Variant::Array(a), Variant::Array(b)) => return self.compare_arrays(a, b),
            _ => {}
        }

        comparison_type(left.variant_type(), right.variant_type())
            .and_then(|common| self.compare_as(left, right, common))
            .ok_or_else(|| Error::InvalidComparison {
                left_type: left.type_name().to_string(),
                right_type: right.type_name().to_string(),
            })
    }

    /// True if both values compare equal; incomparable values are unequal
    pub fn equals(&self, left: &Variant, right: &Variant) -> bool {
        matches!(self.compare(left, right), Ok(Ordering::Equal))
    }

    /// `left > right`
    pub fn more(&self, left: &Variant, right: &Variant) -> Result<bool> {
        Ok(self.compare(left, right)? == Ordering::Greater)
    }

    /// `left < right`
    pub fn less(&self, left: &Variant, right: &Variant) -> Result<bool> {
        Ok(self.compare(left, right)? == Ordering::Less)
    }

    /// Adds two values
    ///
    /// Integers stay integers and widen on overflow, floats widen to
    /// `Float64` unless both are `Float32`, a string operand concatenates,
    /// time spans add to dates and to each other, arrays concatenate, Null is
    /// the identity.
    pub fn add(&self, left: &Variant, right: &Variant) -> Result<Variant> {
        let sum = match (left, right) {
            (Variant::Null, other) | (other, Variant::Null) => Some(other.clone()),
            (Variant::String(a), b) => Some(Variant::String(format!("{}{}", a, b))),
            (a, Variant::String(b)) => Some(Variant::String(format!("{}{}", a, b))),
            (Variant::DateTime(dt), Variant::TimeSpan(ts))
            | (Variant::TimeSpan(ts), Variant::DateTime(dt)) => {
                dt.checked_add_signed(*ts).map(Variant::DateTime)
            }
            (Variant::TimeSpan(a), Variant::TimeSpan(b)) => a.checked_add(b).map(Variant::TimeSpan),
            (Variant::Array(a), Variant::Array(b)) => {
                Some(Variant::array(a.iter().chain(b.iter()).cloned().collect()))
            }
            (Variant::Float32(a), Variant::Float32(b)) => Some(Variant::Float32(a + b)),
            (Variant::Int32(a), Variant::Int32(b)) => Some(
                a.checked_add(*b)
                    .map(Variant::Int32)
                    .unwrap_or(Variant::Int64(i64::from(*a) + i64::from(*b))),
            ),
            (a, b) if is_arithmetic(a) && is_arithmetic(b) => {
                if a.variant_type().is_float() || b.variant_type().is_float() {
                    Some(Variant::Float64(self.to_f64(a)? + self.to_f64(b)?))
                } else {
                    let (x, y) = (self.to_i64(a)?, self.to_i64(b)?);
                    Some(
                        x.checked_add(y)
                            .map(Variant::Int64)
                            .unwrap_or_else(|| Variant::Float64(x as f64 + y as f64)),
                    )
                }
            }
            _ => None,
        };

        sum.ok_or_else(|| Error::InvalidOperation {
            op: "add".to_string(),
            left_type: left.type_name().to_string(),
            right_type: right.type_name().to_string(),
        })
    }

    fn compare_as(&self, left: &Variant, right: &Variant, common: VariantType) -> Option<Ordering> {
        match common {
            VariantType::DateTime => {
                let (a, b) = (self.to_date_time(left).ok()?, self.to_date_time(right).ok()?);
                Some(a.cmp(&b))
            }
            VariantType::TimeSpan => {
                let (a, b) = (self.to_time_span(left).ok()?, self.to_time_span(right).ok()?);
                Some(a.cmp(&b))
            }
            VariantType::Float64 => {
                let (a, b) = (self.to_f64(left).ok()?, self.to_f64(right).ok()?);
                a.partial_cmp(&b)
            }
            VariantType::Int64 => {
                let (a, b) = (self.to_i64(left).ok()?, self.to_i64(right).ok()?);
                Some(a.cmp(&b))
            }
            VariantType::Boolean => {
                let (a, b) = (self.to_bool(left).ok()?, self.to_bool(right).ok()?);
                Some(a.cmp(&b))
            }
            VariantType::String => Some(self.to_string(left).cmp(&self.to_string(right))),
            _ => None,
        }
    }

    fn compare_arrays(&self, left: &[Variant], right: &[Variant]) -> Result<Ordering> {
        for (a, b) in left.iter().zip(right) {
            let ordering = self.compare(a, b)?;
            if ordering != Ordering::Equal {
                return Ok(ordering);
            }
        }
        Ok(left.len().cmp(&right.len()))
    }
}
