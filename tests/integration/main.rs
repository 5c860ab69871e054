//! Integration tests

mod check_test;
mod engine_test;
mod helpers;
