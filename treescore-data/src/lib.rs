//! Library for the data handed to forest evaluators
#![warn(missing_docs, unused)]

#[macro_use]
extern crate serde_derive;

/// Definition of the sparse feature vector
pub mod datatypes;
/// Defines methods for loading forests from a file
pub mod load;
/// External serialization schema of a forest
pub mod schema;
