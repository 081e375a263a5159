//! Parameterless functions: constants, the clock and random numbers

use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::Local;

use crate::error::Result;
use crate::functions::{check_arity, Arity, Function, FunctionCollection};
use crate::runtime::{date_time_ticks, Coercion, Variant};

/// Register constant and clock functions
pub fn register(collection: &mut FunctionCollection) {
    collection.add_function(TicksFunction);
    collection.add_function(NowFunction);
    collection.add_function(ConstantFunction::new(
        "Pi",
        "Ratio of a circle's circumference to its diameter",
        Variant::Float64(std::f64::consts::PI),
    ));
    collection.add_function(ConstantFunction::new(
        "E",
        "Base of the natural logarithm",
        Variant::Float64(std::f64::consts::E),
    ));
    collection.add_function(RandomFunction::new("Rnd"));
    collection.add_function(RandomFunction::new("Random"));
    collection.add_function(ConstantFunction::new("Null", "The null value", Variant::Null));
}

/// Function that always returns the same value
pub struct ConstantFunction {
    name: &'static str,
    description: &'static str,
    value: Variant,
}

impl ConstantFunction {
    /// Creates a constant under `name`
    pub fn new(name: &'static str, description: &'static str, value: Variant) -> Self {
        ConstantFunction {
            name,
            description,
            value,
        }
    }
}

impl Function for ConstantFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        Ok(self.value.clone())
    }
}

/// Ticks() - current local time as 100 ns ticks since 0001-01-01
pub struct TicksFunction;

impl Function for TicksFunction {
    fn name(&self) -> &str {
        "Ticks"
    }

    fn description(&self) -> &str {
        "Current local time in ticks"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        Ok(Variant::Int64(date_time_ticks(&Local::now().naive_local())))
    }
}

/// Now() - current local date and time
pub struct NowFunction;

impl Function for NowFunction {
    fn name(&self) -> &str {
        "Now"
    }

    fn description(&self) -> &str {
        "Current local date and time"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        Ok(Variant::DateTime(Local::now().naive_local()))
    }
}

/// Rnd() / Random() - pseudo-random Float64 in [0, 1)
pub struct RandomFunction {
    name: &'static str,
}

impl RandomFunction {
    /// Random function registered under `name`
    pub fn new(name: &'static str) -> Self {
        RandomFunction { name }
    }
}

impl Function for RandomFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        "Random number between 0 (inclusive) and 1 (exclusive)"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        // Time-seeded hash with a per-call random key
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let hash = RandomState::new().hash_one(now);

        // Top 53 bits give an exactly representable value below 1.0
        let random = (hash >> 11) as f64 / (1u64 << 53) as f64;
        Ok(Variant::Float64(random))
    }
}
