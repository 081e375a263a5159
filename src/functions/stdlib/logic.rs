//! Conditionals, selection and container tests

use crate::error::{Error, Result};
use crate::functions::{check_arity, Arity, Function, FunctionCollection};
use crate::runtime::{Coercion, Variant};

/// Register logic functions
pub fn register(collection: &mut FunctionCollection) {
    collection.add_function(EmptyFunction);
    collection.add_function(ContainsFunction);
    collection.add_function(IfFunction);
    collection.add_function(ChooseFunction);
    collection.add_function(ArrayFunction);
}

/// Empty(value) - true for Null, the empty string and the empty array
pub struct EmptyFunction;

impl Function for EmptyFunction {
    fn name(&self) -> &str {
        "Empty"
    }

    fn description(&self) -> &str {
        "Check if a value is null, an empty string or an empty array"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let empty = match &params[0] {
            Variant::Null => true,
            Variant::String(s) => s.is_empty(),
            Variant::Array(items) => items.is_empty(),
            _ => false,
        };
        Ok(Variant::Boolean(empty))
    }
}

/// Contains(container, item)
///
/// Arrays are searched for an equal element; anything else is tested as a
/// substring of the container's text. A null or empty container contains
/// nothing.
pub struct ContainsFunction;

impl Function for ContainsFunction {
    fn name(&self) -> &str {
        "Contains"
    }

    fn description(&self) -> &str {
        "Check if a container holds an item"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let (container, item) = (&params[0], &params[1]);
        let found = match container {
            Variant::Null => false,
            Variant::Array(items) => items.iter().any(|element| ops.equals(element, item)),
            other => {
                let text = ops.to_string(other);
                !text.is_empty() && text.contains(&ops.to_string(item))
            }
        };
        Ok(Variant::Boolean(found))
    }
}

/// If(condition, then, else)
pub struct IfFunction;

impl Function for IfFunction {
    fn name(&self) -> &str {
        "If"
    }

    fn description(&self) -> &str {
        "Select the second or third parameter by the first"
    }

    fn arity(&self) -> Arity {
        Arity::Exact(3)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let selected = if ops.to_bool(&params[0])? {
            &params[1]
        } else {
            &params[2]
        };
        Ok(selected.clone())
    }
}

/// Choose(index, p0, p1, ...) - `p<index>`, counting from zero
///
/// The index is zero-based over the parameters after the first, so
/// `Choose(0, "a", "b")` returns `"a"` and `Choose(1, "a", "b", "c")`
/// returns `"b"`.
pub struct ChooseFunction;

impl Function for ChooseFunction {
    fn name(&self) -> &str {
        "Choose"
    }

    fn description(&self) -> &str {
        "Select a parameter by index"
    }

    fn arity(&self) -> Arity {
        Arity::AtLeast(3)
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        let index = ops.to_i32(&params[0])?;
        let index = usize::try_from(index).map_err(|_| {
            Error::invalid_arguments(self.name(), format!("index {} is negative", index))
        })?;

        let required = index + 2;
        params
            .get(index + 1)
            .cloned()
            .ok_or_else(|| Error::WrongParamCount {
                function: self.name().to_string(),
                expected: format!("at least {}", required),
                got: params.len(),
            })
    }
}

/// Array(...) - all parameters as one array
pub struct ArrayFunction;

impl Function for ArrayFunction {
    fn name(&self) -> &str {
        "Array"
    }

    fn description(&self) -> &str {
        "Pack the parameters into an array"
    }

    fn arity(&self) -> Arity {
        Arity::Any
    }

    fn calculate(&self, params: &[Variant], _ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        Ok(Variant::array(params.to_vec()))
    }
}
