//! Domain traits - Abstractions for infrastructure implementations

pub mod api;
pub mod codes;
pub mod gateway;
pub mod store;
pub mod verifier;

pub use api::EscrowApi;
pub use codes::PaymentCodeRenderer;
pub use gateway::{ChatGateway, GatewayInfo, KeyboardButton};
pub use store::SessionStore;
pub use verifier::PaymentVerifier;
