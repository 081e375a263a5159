//! Math functions

use crate::error::Result;
use crate::functions::{check_arity, Arity, Function, FunctionCollection};
use crate::runtime::{Coercion, Variant};

/// Register math functions
pub fn register(collection: &mut FunctionCollection) {
    collection.add_function(AbsFunction);

    let unary: [(&'static str, &'static str, fn(f64) -> f64); 18] = [
        ("Acos", "Arc cosine", f64::acos),
        ("Asin", "Arc sine", f64::asin),
        ("Atan", "Arc tangent", f64::atan),
        ("Exp", "e raised to the power", f64::exp),
        ("Log", "Natural logarithm", f64::ln),
        ("Ln", "Natural logarithm", f64::ln),
        ("Log10", "Base 10 logarithm", f64::log10),
        ("Ceil", "Round up", f64::ceil),
        ("Ceiling", "Round up", f64::ceil),
        ("Floor", "Round down", f64::floor),
        ("Round", "Round to nearest, ties to even", round_half_even),
        ("Trunc", "Round toward zero", f64::trunc),
        ("Truncate", "Round toward zero", f64::trunc),
        ("Cos", "Cosine", f64::cos),
        ("Sin", "Sine", f64::sin),
        ("Tan", "Tangent", f64::tan),
        ("Sqr", "Square root", f64::sqrt),
        ("Sqrt", "Square root", f64::sqrt),
    ];
    for (name, description, op) in unary {
        collection.add_function(UnaryMathFunction::new(name, description, op));
    }
}

/// Rounds to the nearest integer, halves to the even neighbour
fn round_half_even(value: f64) -> f64 {
    if (value - value.trunc()).abs() == 0.5 {
        2.0 * (value / 2.0).round()
    } else {
        value.round()
    }
}

/// Abs(number) - absolute value in the parameter's own numeric type
///
/// `Abs(-5)` returns `5`. The absolute value of `i32::MIN` widens to Int64
/// and of `i64::MIN` to Float64. Non-numeric parameters convert to Float64.
pub struct AbsFunction;

impl Function for AbsFunction {
    fn name(&self) -> &str {
        "Abs"
    }

    fn description(&self) -> &str {
        "Absolute value"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        Ok(match &params[0] {
            Variant::Int32(n) => n
                .checked_abs()
                .map(Variant::Int32)
                .unwrap_or(Variant::Int64(i64::from(*n).abs())),
            Variant::Int64(n) => n
                .checked_abs()
                .map(Variant::Int64)
                .unwrap_or(Variant::Float64((*n as f64).abs())),
            Variant::Float32(f) => Variant::Float32(f.abs()),
            Variant::Float64(f) => Variant::Float64(f.abs()),
            other => Variant::Float64(ops.to_f64(other)?.abs()),
        })
    }
}

/// Single-parameter function over Float64
///
/// The parameter is converted to Float64 and the result is Float64.
pub struct UnaryMathFunction {
    name: &'static str,
    description: &'static str,
    op: fn(f64) -> f64,
}

impl UnaryMathFunction {
    /// Creates a function applying `op` under `name`
    pub fn new(name: &'static str, description: &'static str, op: fn(f64) -> f64) -> Self {
        UnaryMathFunction {
            name,
            description,
            op,
        }
    }
}

impl Function for UnaryMathFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let value = ops.to_f64(&params[0])?;
        Ok(Variant::Float64((self.op)(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn call(name: &str, value: Variant) -> Result<Variant> {
        let mut functions = FunctionCollection::empty();
        register(&mut functions);
        functions.evaluate(name, &[value], &Coercion::new())
    }

    #[test]
    fn test_abs_preserves_type() {
        assert_eq!(call("Abs", Variant::Int32(-5)).unwrap(), Variant::Int32(5));
        assert_eq!(call("Abs", Variant::Int64(-5)).unwrap(), Variant::Int64(5));
        assert_eq!(
            call("Abs", Variant::Float32(-1.5)).unwrap(),
            Variant::Float32(1.5)
        );
        assert_eq!(
            call("Abs", Variant::Int32(i32::MIN)).unwrap(),
            Variant::Int64(2_147_483_648)
        );
        assert_eq!(
            call("Abs", Variant::string("-2.5")).unwrap(),
            Variant::Float64(2.5)
        );
    }

    #[test]
    fn test_unary_functions() {
        assert_eq!(call("Sqrt", Variant::Int32(16)).unwrap(), Variant::Float64(4.0));
        assert_eq!(call("sqr", Variant::Int32(9)).unwrap(), Variant::Float64(3.0));
        assert_eq!(call("Floor", Variant::Float64(-1.5)).unwrap(), Variant::Float64(-2.0));
        assert_eq!(call("Ceiling", Variant::Float64(1.2)).unwrap(), Variant::Float64(2.0));
        assert_eq!(call("Truncate", Variant::Float64(-1.7)).unwrap(), Variant::Float64(-1.0));
        assert_eq!(call("Ln", Variant::Int32(1)).unwrap(), Variant::Float64(0.0));
        assert_eq!(call("Log10", Variant::Int32(1000)).unwrap(), Variant::Float64(3.0));
        assert_eq!(call("Cos", Variant::Int32(0)).unwrap(), Variant::Float64(1.0));
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(3.5), 4.0);
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(2.4), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
        assert_eq!(call("Round", Variant::Float64(0.5)).unwrap(), Variant::Float64(0.0));
    }

    #[test]
    fn test_math_arity() {
        let mut functions = FunctionCollection::empty();
        register(&mut functions);
        let err = functions
            .evaluate("Sin", &[], &Coercion::new())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::WrongParamCount);
        assert!(call("Exp", Variant::string("x")).is_err());
    }
}
