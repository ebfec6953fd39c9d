//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Adapters: Chat platform integration (Telegram)
//! - Api: Escrow transactions service client
//! - Sessions: In-memory session store
//! - Qr: Payment code rendering
//! - Verify: Simulated payment verification

pub mod adapters;
pub mod api;
pub mod config;
pub mod qr;
pub mod sessions;
pub mod verify;
