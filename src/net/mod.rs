/// Network access module
///
/// This module handles:
/// - Fetching the course catalog JSON
/// - Fetching and decoding thumbnail bytes
///
/// Every fetch is one-shot: no retry, no cache.

pub mod client;
pub mod error;

pub use client::Fetcher;
pub use error::FetchError;
