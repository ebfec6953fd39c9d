//! End-to-end escrow conversation scenario
//! Run with: cargo test --test escrow_flow
//!
//! Drives the conversation service through the public crate API with a
//! recording gateway and a fake escrow API: /start, start_escrow,
//! amount_500, payment_done, then a status check.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, Once};

use quick_escrow_bot::application::conversation::{ConversationService, ConversationSettings};
use quick_escrow_bot::application::errors::{ApiError, BotError, QrError};
use quick_escrow_bot::domain::entities::{
    BotCommand, CallbackAction, Event, GroupLink, NewTransaction, Transaction, TransactionStatus,
    User,
};
use quick_escrow_bot::domain::traits::{
    ChatGateway, EscrowApi, KeyboardButton, PaymentCodeRenderer, PaymentVerifier,
};
use quick_escrow_bot::infrastructure::sessions::InMemorySessionStore;

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

#[derive(Debug, Clone)]
enum Sent {
    Text(String),
    Keyboard(String, Vec<Vec<KeyboardButton>>),
    Photo(String, Vec<Vec<KeyboardButton>>),
}

#[derive(Default)]
struct Gateway {
    sent: Mutex<Vec<Sent>>,
}

#[async_trait]
impl ChatGateway for Gateway {
    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        self.sent.lock().unwrap().push(Sent::Text(text.into()));
        Ok("1".into())
    }

    async fn send_with_keyboard(
        &self,
        _chat_id: &str,
        text: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<String, BotError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Keyboard(text.into(), buttons));
        Ok("1".into())
    }

    async fn send_photo(
        &self,
        _chat_id: &str,
        _png: Vec<u8>,
        caption: &str,
        buttons: Vec<Vec<KeyboardButton>>,
    ) -> Result<String, BotError> {
        self.sent
            .lock()
            .unwrap()
            .push(Sent::Photo(caption.into(), buttons));
        Ok("1".into())
    }

    async fn answer_callback(&self, _id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }
}

#[derive(Default)]
struct Api {
    store: Mutex<Vec<Transaction>>,
    patches: Mutex<Vec<(i64, TransactionStatus)>>,
}

#[async_trait]
impl EscrowApi for Api {
    async fn create_transaction(&self, new: &NewTransaction) -> Result<Transaction, ApiError> {
        let mut store = self.store.lock().unwrap();
        let id = store.len() as i64 + 1;
        let txn = Transaction {
            id,
            transaction_id: format!("QE-{:05}", id),
            telegram_user_id: new.telegram_user_id.clone(),
            amount: new.amount,
            status: "pending".into(),
            qr_code_data: format!("upi://pay?pa=quickescrow@upi&am={}", new.amount),
            created_at: format!("2024-05-0{}T12:00:00Z", id),
        };
        store.push(txn.clone());
        Ok(txn)
    }

    async fn update_status(&self, id: i64, status: TransactionStatus) -> Result<(), ApiError> {
        self.patches.lock().unwrap().push((id, status));
        let mut store = self.store.lock().unwrap();
        if let Some(txn) = store.iter_mut().find(|t| t.id == id) {
            txn.status = status.as_str().to_string();
        }
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        Ok(self.store.lock().unwrap().clone())
    }

    async fn list_group_links(&self) -> Result<Vec<GroupLink>, ApiError> {
        Ok(vec![])
    }
}

struct AlwaysPass;

impl PaymentVerifier for AlwaysPass {
    fn verify(&self, _transaction_id: i64) -> bool {
        true
    }
}

struct FakeQr;

impl PaymentCodeRenderer for FakeQr {
    fn render(&self, payload: &str) -> Result<Vec<u8>, QrError> {
        if payload.is_empty() {
            return Err(QrError::EmptyPayload);
        }
        Ok(b"\x89PNG".to_vec())
    }
}

fn build() -> (Arc<Gateway>, Arc<Api>, ConversationService) {
    ensure_init();
    let gateway = Arc::new(Gateway::default());
    let api = Arc::new(Api::default());
    let service = ConversationService::new(
        gateway.clone(),
        api.clone(),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(AlwaysPass),
        Arc::new(FakeQr),
        ConversationSettings::default(),
    );
    (gateway, api, service)
}

fn buttons_of(sent: &Sent) -> Vec<&KeyboardButton> {
    match sent {
        Sent::Keyboard(_, rows) | Sent::Photo(_, rows) => rows.iter().flatten().collect(),
        Sent::Text(_) => vec![],
    }
}

#[tokio::test]
async fn full_escrow_happy_path() {
    let (gateway, api, service) = build();
    let user = User::new(4242).with_username("alice");
    let chat = "4242";

    // /start -> welcome menu with 4 navigation actions
    service
        .handle_event(chat, &user, Event::Command(BotCommand::Start))
        .await
        .unwrap();
    {
        let sent = gateway.sent.lock().unwrap();
        assert_eq!(buttons_of(sent.last().unwrap()).len(), 4);
    }

    // start_escrow -> amount menu: 3 presets + custom + cancel
    service
        .handle_event(chat, &user, Event::Callback(CallbackAction::StartEscrow))
        .await
        .unwrap();
    {
        let sent = gateway.sent.lock().unwrap();
        let buttons = buttons_of(sent.last().unwrap());
        assert_eq!(buttons.len(), 5);
        assert!(buttons
            .iter()
            .any(|b| b.callback_data.as_deref() == Some("amount_500")));
    }

    // amount_500 -> payment code with amount and display id in the caption
    service
        .handle_event(chat, &user, Event::Callback(CallbackAction::Amount(500)))
        .await
        .unwrap();
    let txn_id = {
        let sent = gateway.sent.lock().unwrap();
        let Sent::Photo(caption, rows) = sent.last().unwrap() else {
            panic!("expected a payment-code photo");
        };
        assert!(caption.contains("Rs. 500"));
        assert!(caption.contains("QE-00001"));
        let done = rows
            .iter()
            .flatten()
            .find_map(|b| b.callback_data.as_deref()?.strip_prefix("payment_done_"))
            .expect("payment done button")
            .to_string();
        done.parse::<i64>().unwrap()
    };

    // payment_done -> verification passes, status patched to completed
    service
        .handle_event(
            chat,
            &user,
            Event::Callback(CallbackAction::PaymentDone(txn_id)),
        )
        .await
        .unwrap();
    assert_eq!(
        *api.patches.lock().unwrap(),
        vec![(txn_id, TransactionStatus::Completed)]
    );
    {
        let sent = gateway.sent.lock().unwrap();
        let Sent::Keyboard(text, rows) = sent.last().unwrap() else {
            panic!("expected outcome screen");
        };
        assert!(text.contains("Payment Successful"));
        assert!(rows
            .iter()
            .flatten()
            .any(|b| b.callback_data.as_deref() == Some("start_escrow")));
    }

    // /status -> the completed transaction shows up, newest first
    service
        .handle_event(chat, &user, Event::Command(BotCommand::Status))
        .await
        .unwrap();
    {
        let sent = gateway.sent.lock().unwrap();
        let Sent::Keyboard(text, _) = sent.last().unwrap() else {
            panic!("expected status screen");
        };
        assert!(text.contains("QE-00001"));
        assert!(text.contains("Status: Completed"));
        assert!(text.contains("Date: 2024-05-01"));
    }
}

#[tokio::test]
async fn custom_amount_round_trip() {
    let (gateway, api, service) = build();
    let user = User::new(7).with_username("bob");
    let chat = "7";

    service
        .handle_event(chat, &user, Event::Callback(CallbackAction::StartEscrow))
        .await
        .unwrap();
    service
        .handle_event(chat, &user, Event::Callback(CallbackAction::AmountCustom))
        .await
        .unwrap();

    // Garbage first: no transaction, reprompt
    service
        .handle_event(chat, &user, Event::Text("a lot".into()))
        .await
        .unwrap();
    assert!(api.store.lock().unwrap().is_empty());

    // Then a real amount
    service
        .handle_event(chat, &user, Event::Text("750".into()))
        .await
        .unwrap();
    let store = api.store.lock().unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store[0].amount, 750);
    assert_eq!(store[0].telegram_user_id, "7");

    let sent = gateway.sent.lock().unwrap();
    let Sent::Photo(caption, _) = sent.last().unwrap() else {
        panic!("expected a payment-code photo");
    };
    assert!(caption.contains("Rs. 750"));
}

#[tokio::test]
async fn group_links_empty_set_is_not_an_error() {
    let (gateway, _api, service) = build();
    let user = User::new(9);

    service
        .handle_event("9", &user, Event::Callback(CallbackAction::GroupLinks))
        .await
        .unwrap();

    let sent = gateway.sent.lock().unwrap();
    let Sent::Keyboard(text, rows) = sent.last().unwrap() else {
        panic!("expected group links screen");
    };
    assert!(text.contains("No group links"));
    let buttons: Vec<_> = rows.iter().flatten().collect();
    assert_eq!(buttons.len(), 1);
    assert_eq!(buttons[0].callback_data.as_deref(), Some("cancel"));
}
