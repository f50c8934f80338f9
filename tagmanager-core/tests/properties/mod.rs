//! Property-based tests for the tag manager core library

mod config_tests;
mod expander_tests;
mod registry_tests;
mod snippet_tests;
