//! # AstGen Bench
//!
//! Synthetic schemas for AstGen benchmarks.

pub mod fixtures;
