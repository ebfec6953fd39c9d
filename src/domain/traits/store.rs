use crate::domain::entities::Session;

/// SessionStore trait - abstraction over per-user conversation state.
///
/// The naive in-memory map satisfies this today; a bounded or TTL-backed
/// store can replace it without touching the conversation core. Callers do
/// read-modify-write through `get`/`set`; a missing session is treated as a
/// fresh default rather than an error, so out-of-order events (a button tap
/// before `/start`) never crash.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: i64) -> Option<Session>;
    fn set(&self, user_id: i64, session: Session);
    fn remove(&self, user_id: i64);

    /// Existing session or a fresh default
    fn get_or_default(&self, user_id: i64) -> Session {
        self.get(user_id).unwrap_or_default()
    }
}
