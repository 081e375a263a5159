//! Standard library functions for Lexicalc

pub mod aggregates;
pub mod constants;
pub mod logic;
pub mod math;
pub mod time_date;

use crate::functions::FunctionCollection;

/// Register all standard library functions
pub fn register_all(collection: &mut FunctionCollection) {
    let before = collection.len();

    constants::register(collection);
    time_date::register(collection);
    math::register(collection);
    logic::register(collection);
    aggregates::register(collection);

    tracing::debug!(
        count = collection.len() - before,
        "registered standard library functions"
    );
}
