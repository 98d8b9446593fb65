//! Utility module

pub mod datetime;
