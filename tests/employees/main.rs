//! Employee registry integration tests.

mod scenarios;
mod file_store;

#[cfg(feature = "http")]
mod http;
