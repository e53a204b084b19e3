//! Unit test suites, one module per source area.

pub mod stats;
