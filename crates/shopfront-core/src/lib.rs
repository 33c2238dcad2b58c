//! Ambient building blocks shared by Shopfront services: configuration
//! loading, the common error envelope, health probes, request ids, tracing
//! setup and serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
