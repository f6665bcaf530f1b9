//! HTTP API client for the visastat server

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
