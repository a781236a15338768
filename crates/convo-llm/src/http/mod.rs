mod client;

pub use client::{HttpBackendClient, HttpBackendClientBuilder};
