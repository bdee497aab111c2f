//! Integration tests for Automobile
//!
//! The extraction service is replaced by a wiremock server and the external
//! converter by an in-process fake, so every test runs offline.

mod fetch_tests;
mod package_tests;
