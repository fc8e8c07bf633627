//! Code generators for native wrappers

pub mod rust;
