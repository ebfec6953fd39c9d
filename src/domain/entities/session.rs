use super::Transaction;

/// Where a user currently is in the escrow conversation.
///
/// The state decides which inbound events are meaningful; anything else is
/// ignored or answered with a reprompt, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Main menu shown, nothing in flight
    #[default]
    Welcome,
    /// Amount menu shown, waiting for a preset or custom choice
    SelectingAmount,
    /// Waiting for a free-text custom amount
    EnteringCustomAmount,
    /// Payment code shown, waiting for the payment-done tap
    AwaitingPayment,
}

/// Per-user in-memory conversation record.
///
/// Overwritten whole whenever a new escrow flow begins; a fresh default is
/// created on demand when an event arrives for an unseen user.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub state: SessionState,
    pub username: String,
    /// Last transaction created in this session, set once an amount is chosen
    pub transaction: Option<Transaction>,
}

impl Session {
    /// Fresh session at the welcome menu
    pub fn welcome(username: impl Into<String>) -> Self {
        Self {
            state: SessionState::Welcome,
            username: username.into(),
            transaction: None,
        }
    }

    /// Fresh session at the amount menu, starting a new escrow flow
    pub fn selecting_amount(username: impl Into<String>) -> Self {
        Self {
            state: SessionState::SelectingAmount,
            username: username.into(),
            transaction: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_starts_at_welcome() {
        let session = Session::default();
        assert_eq!(session.state, SessionState::Welcome);
        assert!(session.transaction.is_none());
    }

    #[test]
    fn new_flow_discards_previous_transaction() {
        let mut session = Session::welcome("alice");
        session.transaction = Some(crate::domain::entities::Transaction {
            id: 1,
            transaction_id: "TXN-1".into(),
            telegram_user_id: "42".into(),
            amount: 100,
            status: "pending".into(),
            qr_code_data: String::new(),
            created_at: String::new(),
        });
        session = Session::selecting_amount(session.username.clone());
        assert!(session.transaction.is_none());
        assert_eq!(session.state, SessionState::SelectingAmount);
    }
}
