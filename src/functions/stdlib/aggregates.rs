//! Folding functions over two or more parameters

use std::cmp::Ordering;

use crate::error::Result;
use crate::functions::{check_arity, Arity, Function, FunctionCollection};
use crate::runtime::{Coercion, Variant};

/// Register aggregate functions
pub fn register(collection: &mut FunctionCollection) {
    collection.add_function(MinFunction);
    collection.add_function(MaxFunction);
    collection.add_function(SumFunction);
}

/// Parameter that wins every comparison in the `keep` direction; ties keep
/// the earlier one
fn extremum(params: &[Variant], ops: &Coercion, keep: Ordering) -> Result<Variant> {
    let mut best = &params[0];
    for candidate in &params[1..] {
        if ops.compare(candidate, best)? == keep {
            best = candidate;
        }
    }
    Ok(best.clone())
}

/// Min(a, b, ...) - smallest parameter, unconverted
///
/// Example: `Min(3, 1, 2)` returns `1`
pub struct MinFunction;

impl Function for MinFunction {
    fn name(&self) -> &str {
        "Min"
    }

    fn description(&self) -> &str {
        "Smallest parameter"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        extremum(params, ops, Ordering::Less)
    }
}

/// Max(a, b, ...) - largest parameter, unconverted
///
/// Example: `Max(3, 1, 2)` returns `3`
pub struct MaxFunction;

impl Function for MaxFunction {
    fn name(&self) -> &str {
        "Max"
    }

    fn description(&self) -> &str {
        "Largest parameter"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        extremum(params, ops, Ordering::Greater)
    }
}

/// Sum(a, b, ...) - left fold with addition
///
/// Example: `Sum(1, 2, 3)` returns `6`
pub struct SumFunction;

impl Function for SumFunction {
    fn name(&self) -> &str {
        "Sum"
    }

    fn description(&self) -> &str {
        "Sum of the parameters"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(2)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        params[1..]
            .iter()
            .try_fold(params[0].clone(), |total, value| ops.add(&total, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ErrorCode};

    fn ints(values: &[i32]) -> Vec<Variant> {
        values.iter().map(|v| Variant::Int32(*v)).collect()
    }

    #[test]
    fn test_min_max() {
        let ops = Coercion::new();
        assert_eq!(MinFunction.evaluate(&ints(&[3, 1, 2]), &ops).unwrap(), Variant::Int32(1));
        assert_eq!(MaxFunction.evaluate(&ints(&[3, 1, 2]), &ops).unwrap(), Variant::Int32(3));
    }

    #[test]
    fn test_min_returns_original_operand() {
        let ops = Coercion::new();
        let params = vec![Variant::Float64(2.5), Variant::string("2"), Variant::Int64(3)];
        assert_eq!(MinFunction.evaluate(&params, &ops).unwrap(), Variant::string("2"));

        // Equal values keep the first
        let params = vec![Variant::Int32(1), Variant::Float64(1.0)];
        assert_eq!(MaxFunction.evaluate(&params, &ops).unwrap(), Variant::Int32(1));
    }

    #[test]
    fn test_min_incomparable() {
        let ops = Coercion::new();
        let params = vec![Variant::Int32(1), Variant::array(vec![])];
        assert!(matches!(
            MinFunction.evaluate(&params, &ops),
            Err(Error::InvalidComparison { .. })
        ));
    }

    #[test]
    fn test_sum() {
        let ops = Coercion::new();
        assert_eq!(SumFunction.evaluate(&ints(&[1, 2, 3]), &ops).unwrap(), Variant::Int32(6));
        assert_eq!(
            SumFunction
                .evaluate(&[Variant::Int32(1), Variant::Float64(0.5)], &ops)
                .unwrap(),
            Variant::Float64(1.5)
        );
    }

    #[test]
    fn test_single_parameter_rejected() {
        let ops = Coercion::new();
        for function in [&MinFunction as &dyn Function, &MaxFunction, &SumFunction] {
            let err = function.evaluate(&ints(&[1]), &ops).unwrap_err();
            assert_eq!(err.code(), ErrorCode::WrongParamCount);
        }
    }
}
