//! Runtime values for Lexicalc functions

mod coercion;
mod variant;

pub use coercion::{
    date_time_from_ticks, date_time_ticks, format_date_time, format_time_span, parse_date_time,
    parse_time_span, time_span_from_ticks, time_span_ticks, Coercion, TICKS_PER_DAY,
    TICKS_PER_HOUR, TICKS_PER_MICROSECOND, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE,
    TICKS_PER_SECOND,
};
pub use variant::{Variant, VariantType};
