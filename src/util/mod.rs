// file: src/util/mod.rs
// description: utility functions module exports
// reference: internal module structure

pub mod json;
pub mod logging;
pub mod validation;

pub use json::{get_as_int, get_as_long, get_as_string, json_to_object};
pub use validation::Validator;
