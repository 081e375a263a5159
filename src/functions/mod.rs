//! Function system for Lexicalc
//!
//! Provides the [`Function`] contract, arity policies, and the
//! [`FunctionCollection`] that hosts built-in and custom functions.

#[cfg(feature = "stdlib")]
pub mod stdlib;

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::runtime::{Coercion, Variant};

/// Number of parameters a function accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` parameters
    Exact(usize),
    /// Any of the listed counts
    OneOf(&'static [usize]),
    /// Between `min` and `max` parameters, inclusive
    Range(usize, usize),
    /// `n` or more parameters
    AtLeast(usize),
    /// Any number of parameters
    Any,
}

impl Arity {
    /// Returns true if `count` parameters are accepted
    pub fn check(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::OneOf(counts) => counts.contains(&count),
            Arity::Range(min, max) => (*min..=*max).contains(&count),
            Arity::AtLeast(n) => count >= *n,
            Arity::Any => true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::OneOf(counts) => {
                let counts: Vec<String> = counts.iter().map(|c| c.to_string()).collect();
                match counts.split_last() {
                    Some((last, rest)) if !rest.is_empty() => {
                        write!(f, "{} or {}", rest.join(", "), last)
                    }
                    Some((last, _)) => f.write_str(last),
                    None => f.write_str("none"),
                }
            }
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
            Arity::Any => f.write_str("any number"),
        }
    }
}

/// Function trait - every callable in a [`FunctionCollection`] implements this
pub trait Function: Send + Sync {
    /// Function name, matched case-insensitively
    fn name(&self) -> &str;

    /// Function description
    fn description(&self) -> &str {
        ""
    }

    /// Accepted parameter counts
    fn arity(&self) -> Arity;

    /// Computes the result
    ///
    /// Callable directly, so implementations start with [`check_arity`]
    /// before touching `params`.
    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant>;

    /// Checks the parameter count, then calculates
    fn evaluate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        self.calculate(params, ops)
    }
}

/// Fails with [`Error::WrongParamCount`] unless `function` accepts
/// `params.len()` parameters
pub fn check_arity<F: Function + ?Sized>(function: &F, params: &[Variant]) -> Result<()> {
    let arity = function.arity();
    if arity.check(params.len()) {
        Ok(())
    } else {
        Err(Error::WrongParamCount {
            function: function.name().to_string(),
            expected: arity.to_string(),
            got: params.len(),
        })
    }
}

type Calculator = dyn Fn(&[Variant], &Coercion) -> Result<Variant> + Send + Sync;

/// Adapts a name, an arity and a closure into a [`Function`]
pub struct DelegatedFunction {
    name: String,
    arity: Arity,
    calculator: Box<Calculator>,
}

impl DelegatedFunction {
    /// Creates a function that delegates to `calculator`
    pub fn new<F>(name: impl Into<String>, arity: Arity, calculator: F) -> Self
    where
        F: Fn(&[Variant], &Coercion) -> Result<Variant> + Send + Sync + 'static,
    {
        DelegatedFunction {
            name: name.into(),
            arity,
            calculator: Box::new(calculator),
        }
    }
}

impl Function for DelegatedFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> Arity {
        self.arity
    }

    fn calculate(&self, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        check_arity(self, params)?;
        (self.calculator)(params, ops)
    }
}

impl fmt::Debug for DelegatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("DelegatedFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of functions with case-insensitive lookup
///
/// Duplicate names are allowed; lookups return the first match.
#[derive(Clone)]
pub struct FunctionCollection {
    functions: Vec<Arc<dyn Function>>,
}

impl FunctionCollection {
    /// Create new collection with the standard library
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut collection = FunctionCollection::empty();

        #[cfg(feature = "stdlib")]
        stdlib::register_all(&mut collection);

        collection
    }

    /// Create empty collection
    pub fn empty() -> Self {
        FunctionCollection {
            functions: Vec::new(),
        }
    }

    /// Appends a shared function, returning its index
    pub fn add(&mut self, function: Arc<dyn Function>) -> usize {
        self.functions.push(function);
        self.functions.len() - 1
    }

    /// Appends a function, returning its index
    pub fn add_function<F: Function + 'static>(&mut self, function: F) -> usize {
        self.add(Arc::new(function))
    }

    /// Function at `index`
    pub fn get(&self, index: usize) -> Option<Arc<dyn Function>> {
        self.functions.get(index).cloned()
    }

    /// All functions in insertion order
    pub fn get_all(&self) -> &[Arc<dyn Function>] {
        &self.functions
    }

    /// Index of the first function called `name`, ignoring case
    pub fn find_index_by_name(&self, name: &str) -> Option<usize> {
        self.functions
            .iter()
            .position(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// First function called `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.find_index_by_name(name).and_then(|i| self.get(i))
    }

    /// Removes and returns the function at `index`
    pub fn remove(&mut self, index: usize) -> Option<Arc<dyn Function>> {
        if index < self.functions.len() {
            Some(self.functions.remove(index))
        } else {
            None
        }
    }

    /// Removes the first function called `name`, ignoring case
    pub fn remove_by_name(&mut self, name: &str) -> Option<Arc<dyn Function>> {
        let index = self.find_index_by_name(name)?;
        self.remove(index)
    }

    /// Removes every function
    pub fn clear(&mut self) {
        self.functions.clear();
    }

    /// Number of functions
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if the collection holds no functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Function names in insertion order
    pub fn names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name()).collect()
    }

    /// Looks up `name` and evaluates it
    pub fn evaluate(&self, name: &str, params: &[Variant], ops: &Coercion) -> Result<Variant> {
        let function = self
            .find_by_name(name)
            .ok_or_else(|| Error::UndefinedFunction {
                name: name.to_string(),
            })?;
        tracing::debug!(function = function.name(), params = params.len(), "evaluate");
        function.evaluate(params, ops)
    }
}

impl Default for FunctionCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
