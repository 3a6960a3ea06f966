use std::io::{Read, Write};

use crate::error::EvalError;

/// Evaluates a model with a given payload to a given output.
///
/// Implementations hold no mutable state after construction, so `evaluate` may be
/// invoked concurrently from any number of callers.
pub trait Evaluator<Payload: ?Sized, Output>: Sync {
    /// Scores a single payload.
    fn evaluate(&self, payload: &Payload) -> Result<Output, EvalError>;
}

impl<'a, P: ?Sized, O, E: Evaluator<P, O> + ?Sized> Evaluator<P, O> for &'a E {
    fn evaluate(&self, payload: &P) -> Result<O, EvalError> {
        (**self).evaluate(payload)
    }
}

impl<P: ?Sized, O, E: Evaluator<P, O> + ?Sized> Evaluator<P, O> for Box<E> {
    fn evaluate(&self, payload: &P) -> Result<O, EvalError> {
        (**self).evaluate(payload)
    }
}

/// Serialization for models
pub trait SerDe: Sized {
    /// Error conditions due to reading or writing
    type Error;

    /// Writes out a model to writer
    fn save<A: Write>(&self, writer: &mut A) -> Result<(), Self::Error>;

    /// Loads a model from a reader.  All necessary metadata should be
    /// stored within the model
    fn load<A: Read>(reader: &mut A) -> Result<Self, Self::Error>;
}
