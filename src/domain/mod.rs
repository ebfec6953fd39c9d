//! Domain layer - Core escrow conversation model with no external dependencies
//!
//! This layer contains:
//! - Entities: Sessions, transactions, inbound events
//! - Traits: Abstractions for infrastructure (gateway, API client, store, verifier)

pub mod entities;
pub mod traits;
