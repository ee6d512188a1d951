//! Integration tests

mod config_test;
mod server_test;
mod session_test;
mod valuation_test;
