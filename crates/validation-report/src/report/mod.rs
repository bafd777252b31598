//! Validation report
//!
//! A [`Report`] accumulates the issues a validator finds while checking one
//! input value and answers questions about them afterwards:
//! - `core`: construction, recording issues, snapshots and serialization
//! - `query`: lookups by path, rule or predicate
//! - `options`: serde-backed construction options
//! - `tests`: unit tests for the report surface
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod core;
pub mod options;
pub mod query;

pub use self::core::Report;
pub use self::options::ReportOptions;
