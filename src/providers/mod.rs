//! Provider implementations.

pub mod lexa;
