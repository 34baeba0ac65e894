//! Utility modules for the Lexa provider adapter.

pub mod cancel;
