//! HTTP request handlers

pub mod tenants;
pub mod twinscale;
