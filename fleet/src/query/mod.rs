//! Natural-language asset search.
//!
//! # Recognized phrases
//!
//! Applied in order, each stripped from the residual term:
//!
//! - **Equipment type**: `pump`, `compressors`, `heat exchanger`, ...
//! - **Location**: `in Plant A`, `at building 4`
//! - **Maintenance due**: `maintenance due`, `needs maintenance`, `overdue`
//! - **Criticality**: `critical`, `high priority`
//! - **Install year**: `2019`, `installed in 2019`
//! - **Status**: `offline`, `not in use`, ... or an any-of set joined by `or`
//!
//! Whatever is left is matched token-by-token against the asset's text fields.

mod parser;

pub use parser::{parse_search, ParsedFilters, ParsedSearch};

#[cfg(test)]
mod tests;
