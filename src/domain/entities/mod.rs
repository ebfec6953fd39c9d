//! Domain entities - Core escrow objects with no external dependencies

pub mod event;
pub mod session;
pub mod transaction;
pub mod user;

pub use event::{BotCommand, CallbackAction, Event};
pub use session::{Session, SessionState};
pub use transaction::{GroupLink, NewTransaction, Transaction, TransactionStatus};
pub use user::User;
