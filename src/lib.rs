//! QuickEscrow bot - a conversational front-end for an escrow payment flow
//!
//! Layered like a small hexagon: `domain` holds the session and event
//! model plus the trait seams, `application` the conversation state
//! machine, `infrastructure` the Telegram adapter, escrow API client,
//! session store, payment-code renderer, and configuration.

pub mod application;
pub mod domain;
pub mod infrastructure;
