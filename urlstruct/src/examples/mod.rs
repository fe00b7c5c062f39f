//! Runnable examples.
//!
//! Each example builds a filter record, decodes a query string into it and
//! asserts on the result. `tests/examples.rs` runs them all.

pub mod ex01_book_filter;
pub mod ex02_operator_filters;
pub mod ex03_custom_values;
pub mod ex04_error_policy;

use anyhow::Result;

/// Run all examples in sequence.
pub fn run_all() -> Result<()> {
    ex01_book_filter::run()?;
    ex02_operator_filters::run()?;
    ex03_custom_values::run()?;
    ex04_error_policy::run()?;
    Ok(())
}
