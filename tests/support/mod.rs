//! Helpers shared by integration test binaries.

// Each test binary uses a different subset.
#![allow(dead_code)]

pub mod upstream;
