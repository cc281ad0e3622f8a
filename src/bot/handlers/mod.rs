//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for categories, roles, member names and vendor options
pub mod autocomplete;
