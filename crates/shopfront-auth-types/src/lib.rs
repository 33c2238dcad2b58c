//! Auth types shared across Shopfront crates.
//!
//! Provides the gateway identity extractors `IdentityHeaders` and `Caller`.

pub mod identity;
