//! Integration test suite entry point.

mod persistence_tests;
