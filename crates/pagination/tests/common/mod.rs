//! Test infrastructure for the pagination layer.
//!
//! Each integration test binary uses a different subset of these helpers.

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
