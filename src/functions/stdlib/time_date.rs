//! Date and time span construction

use chrono::{Datelike, NaiveDate, Timelike};

use crate::error::{Error, Result};
use crate::functions::{check_arity, Arity, Function, FunctionCollection};
use crate::runtime::{
    time_span_from_ticks, Coercion, Variant, TICKS_PER_HOUR, TICKS_PER_MICROSECOND,
    TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

/// Register date and time functions
pub fn register(collection: &mut FunctionCollection) {
    collection.add_function(TimeSpanFunction);
    collection.add_function(TimeOfDayFunction);
    collection.add_function(DateFunction);
    collection.add_function(DayOfWeekFunction);
}

/// Sums `value * unit` over the components, failing on overflow
fn component_ticks(
    function: &str,
    params: &[Variant],
    units: &[i64],
    ops: &Coercion,
) -> Result<i64> {
    let mut total: i64 = 0;
    for (param, unit) in params.iter().zip(units) {
        total = ops
            .to_i64(param)?
            .checked_mul(*unit)
            .and_then(|ticks| total.checked_add(ticks))
            .ok_or_else(|| Error::invalid_arguments(function, "time span out of range"))?;
    }
    Ok(total)
}

fn to_u32(function: &str, what: &str, value: &Variant, ops: &Coercion) -> Result<u32> {
    u32::try_from(ops.to_i32(value)?)
        .map_err(|_| Error::invalid_arguments(function, format!("{} must not be negative", what)))
}

/// TimeSpan(ticks) or TimeSpan(h, m, s[, ms[, µs]])
///
/// Example: `TimeSpan(1, 30, 0)` is one and a half hours
pub struct TimeSpanFunction;

impl Function for TimeSpanFunction {
    fn name(&self) -> &str {
        "TimeSpan"
    }

    fn description(&self) -> &str {
        "Time span from ticks or hour, minute, second components"
    }

    fn arity(&self) -> Arity {
        Arity::OneOf(&[1, 3, 4, 5])
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        if let [value] = params {
            return Ok(Variant::TimeSpan(ops.to_time_span(value)?));
        }

        let ticks = component_ticks(
            self.name(),
            params,
            &[
                TICKS_PER_HOUR,
                TICKS_PER_MINUTE,
                TICKS_PER_SECOND,
                TICKS_PER_MILLISECOND,
                TICKS_PER_MICROSECOND,
            ],
            ops,
        )?;
        Ok(Variant::TimeSpan(time_span_from_ticks(ticks)))
    }
}

/// TimeOfDay(datetime) or TimeOfDay(h, m, s)
pub struct TimeOfDayFunction;

impl Function for TimeOfDayFunction {
    fn name(&self) -> &str {
        "TimeOfDay"
    }

    fn description(&self) -> &str {
        "Time elapsed since midnight"
    }

    fn arity(&self) -> Arity {
        Arity::OneOf(&[1, 3])
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let ticks = match params {
            [value] => {
                let time = ops.to_date_time(value)?.time();
                i64::from(time.num_seconds_from_midnight()) * TICKS_PER_SECOND
                    + i64::from(time.nanosecond()) / 100
            }
            _ => component_ticks(
                self.name(),
                params,
                &[TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND],
                ops,
            )?,
        };
        Ok(Variant::TimeSpan(time_span_from_ticks(ticks)))
    }
}

/// Date(value) or Date(year[, month[, day[, hour[, minute[, second[, ms]]]]]])
///
/// A single parameter may be ticks, a date or date text. Month and day
/// default to 1, the time components to 0.
pub struct DateFunction;

impl Function for DateFunction {
    fn name(&self) -> &str {
        "Date"
    }

    fn description(&self) -> &str {
        "Date and time from ticks, text or components"
    }

    fn arity(&self) -> Arity {
        Arity::Range(1, 7)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        if let [value] = params {
            return Ok(Variant::DateTime(ops.to_date_time(value)?));
        }

        let name = self.name();
        let year = ops.to_i32(&params[0])?;
        let component = |index: usize, what: &str, default: u32| -> Result<u32> {
            match params.get(index) {
                Some(value) => to_u32(name, what, value, ops),
                None => Ok(default),
            }
        };
        let month = component(1, "month", 1)?;
        let day = component(2, "day", 1)?;
        let hour = component(3, "hour", 0)?;
        let minute = component(4, "minute", 0)?;
        let second = component(5, "second", 0)?;
        let milli = component(6, "millisecond", 0)?;
        // chrono reads 1000..2000 as a leap second
        if milli >= 1000 {
            return Err(Error::invalid_arguments(
                name,
                format!("millisecond {} is out of range", milli),
            ));
        }

        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
            .map(Variant::DateTime)
            .ok_or_else(|| {
                Error::invalid_arguments(
                    name,
                    format!(
                        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03} is not a valid date",
                        year, month, day, hour, minute, second, milli
                    ),
                )
            })
    }
}

/// DayOfWeek(date) - 0 for Sunday through 6 for Saturday
pub struct DayOfWeekFunction;

impl Function for DayOfWeekFunction {
    fn name(&self) -> &str {
        "DayOfWeek"
    }

    fn description(&self) -> &str {
        "Day of the week, Sunday = 0"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let date = ops.to_date_time(&params[0])?;
        Ok(Variant::Int32(date.weekday().num_days_from_sunday() as i32))
    }
}
