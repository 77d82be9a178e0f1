//! Utility functions for code generation, input validation, and database errors.
//!
//! - [`code_generator`] - Random short code generation and reserved codes
//! - [`validation`] - Target URL and alias syntax classifiers
//! - [`db_error`] - sqlx error classification

pub mod code_generator;
pub mod db_error;
pub mod validation;
