//! HTTP client module
//!
//! Provides the HTTP client the fetchers are built on.
//!
//! # Features
//!
//! - **Base URL and default headers**: set once, applied to every request
//! - **Request pacing**: Token bucket rate limiter using governor
//! - **Status classification**: rate limiting, client and server errors
//!   become typed [`Error`](crate::Error) values

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
