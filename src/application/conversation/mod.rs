//! Conversation state machine - the core of the bot
//!
//! `ConversationService` interprets inbound commands, button taps, and free
//! text against the user's session, drives the escrow API and payment-code
//! renderer, and emits screens through the chat gateway. Every collaborator
//! sits behind a trait so the whole machine is testable without a network.

pub mod screens;

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::domain::entities::{
    BotCommand, CallbackAction, Event, NewTransaction, Session, SessionState, Transaction,
    TransactionStatus, User,
};
use crate::domain::traits::{
    ChatGateway, EscrowApi, PaymentCodeRenderer, PaymentVerifier, SessionStore,
};

/// Knobs the state machine needs beyond its collaborators
#[derive(Debug, Clone)]
pub struct ConversationSettings {
    /// Payment collection address shown in captions
    pub upi_id: String,
    /// Closed set of preset amounts offered on the amount menu
    pub presets: Vec<u64>,
    /// Whether a user may tap "payment done" again on the same transaction
    /// after a failed verification
    pub allow_retry: bool,
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self {
            upi_id: "quickescrow@upi".to_string(),
            presets: vec![100, 500, 1000],
            allow_retry: true,
        }
    }
}

pub struct ConversationService {
    gateway: Arc<dyn ChatGateway>,
    api: Arc<dyn EscrowApi>,
    sessions: Arc<dyn SessionStore>,
    verifier: Arc<dyn PaymentVerifier>,
    codes: Arc<dyn PaymentCodeRenderer>,
    settings: ConversationSettings,
}

impl ConversationService {
    pub fn new(
        gateway: Arc<dyn ChatGateway>,
        api: Arc<dyn EscrowApi>,
        sessions: Arc<dyn SessionStore>,
        verifier: Arc<dyn PaymentVerifier>,
        codes: Arc<dyn PaymentCodeRenderer>,
        settings: ConversationSettings,
    ) -> Self {
        Self {
            gateway,
            api,
            sessions,
            verifier,
            codes,
            settings,
        }
    }

    /// Dispatch one inbound event. Recoverable problems (API failures, bad
    /// input) are answered in-chat and return `Ok`; only gateway delivery
    /// failures bubble up to the polling loop's error boundary.
    pub async fn handle_event(
        &self,
        chat_id: &str,
        user: &User,
        event: Event,
    ) -> Result<(), BotError> {
        match event {
            Event::Command(BotCommand::Start) | Event::Callback(CallbackAction::Cancel) => {
                self.show_welcome(chat_id, user).await
            }
            Event::Command(BotCommand::Escrow) | Event::Callback(CallbackAction::StartEscrow) => {
                self.begin_escrow(chat_id, user).await
            }
            Event::Command(BotCommand::Status) | Event::Callback(CallbackAction::CheckStatus) => {
                self.show_status(chat_id, user).await
            }
            Event::Command(BotCommand::Help) | Event::Callback(CallbackAction::Help) => {
                self.gateway
                    .send_with_keyboard(chat_id, &screens::help_text(), screens::help_keyboard())
                    .await?;
                Ok(())
            }
            Event::Callback(CallbackAction::Support) => {
                self.gateway
                    .send_with_keyboard(
                        chat_id,
                        &screens::support_text(),
                        screens::support_keyboard(),
                    )
                    .await?;
                Ok(())
            }
            Event::Callback(CallbackAction::GroupLinks) => self.show_group_links(chat_id).await,
            Event::Callback(CallbackAction::Amount(amount)) => {
                // Only meaningful while the amount menu is up; stale taps
                // from old menus are ignored.
                let session = self.sessions.get_or_default(user.id);
                if session.state == SessionState::SelectingAmount {
                    self.process_amount(chat_id, user, amount).await
                } else {
                    Ok(())
                }
            }
            Event::Callback(CallbackAction::AmountCustom) => {
                let mut session = self.sessions.get_or_default(user.id);
                if session.state == SessionState::SelectingAmount {
                    session.state = SessionState::EnteringCustomAmount;
                    self.sessions.set(user.id, session);
                    self.gateway
                        .send_message(chat_id, &screens::custom_amount_prompt())
                        .await?;
                }
                Ok(())
            }
            Event::Callback(CallbackAction::PaymentDone(id)) => {
                self.process_payment_done(chat_id, user, id).await
            }
            Event::Command(BotCommand::Unknown(_)) => {
                self.gateway
                    .send_message(chat_id, &screens::nudge_text())
                    .await?;
                Ok(())
            }
            Event::Text(text) => self.handle_text(chat_id, user, &text).await,
        }
    }

    async fn show_welcome(&self, chat_id: &str, user: &User) -> Result<(), BotError> {
        self.sessions
            .set(user.id, Session::welcome(user.display_name()));
        self.gateway
            .send_with_keyboard(chat_id, &screens::welcome_text(), screens::welcome_keyboard())
            .await?;
        Ok(())
    }

    async fn begin_escrow(&self, chat_id: &str, user: &User) -> Result<(), BotError> {
        self.sessions
            .set(user.id, Session::selecting_amount(user.display_name()));
        self.gateway
            .send_with_keyboard(
                chat_id,
                &screens::amount_text(),
                screens::amount_keyboard(&self.settings.presets),
            )
            .await?;
        Ok(())
    }

    /// Free text is only an amount while the session asks for one;
    /// everything else gets a generic nudge.
    async fn handle_text(&self, chat_id: &str, user: &User, text: &str) -> Result<(), BotError> {
        let session = self.sessions.get_or_default(user.id);
        if session.state != SessionState::EnteringCustomAmount {
            self.gateway
                .send_message(chat_id, &screens::nudge_text())
                .await?;
            return Ok(());
        }
        match text.trim().parse::<i64>() {
            Ok(amount) if amount > 0 => self.process_amount(chat_id, user, amount as u64).await,
            Ok(_) => {
                self.gateway
                    .send_message(chat_id, &screens::invalid_amount_text())
                    .await?;
                Ok(())
            }
            Err(_) => {
                self.gateway
                    .send_message(chat_id, &screens::not_a_number_text())
                    .await?;
                Ok(())
            }
        }
    }

    /// Preset and custom amounts converge here: create the transaction,
    /// render the payment code, move to AwaitingPayment. Any failure turns
    /// into a retry prompt and leaves the session where it was.
    async fn process_amount(&self, chat_id: &str, user: &User, amount: u64) -> Result<(), BotError> {
        let mut session = self.sessions.get_or_default(user.id);
        if session.username.is_empty() {
            session.username = user.display_name();
        }
        let new = NewTransaction::upi(user.id, session.username.clone(), amount);

        let txn = match self.api.create_transaction(&new).await {
            Ok(txn) => txn,
            Err(e) => {
                tracing::error!("Failed to create transaction: {}", e);
                self.gateway
                    .send_with_keyboard(
                        chat_id,
                        &screens::create_failed_text(),
                        screens::retry_keyboard(),
                    )
                    .await?;
                return Ok(());
            }
        };

        let png = match self.codes.render(&txn.qr_code_data) {
            Ok(png) => png,
            Err(e) => {
                tracing::error!("Failed to render payment code: {}", e);
                self.gateway
                    .send_with_keyboard(
                        chat_id,
                        &screens::qr_failed_text(),
                        screens::retry_keyboard(),
                    )
                    .await?;
                return Ok(());
            }
        };

        let caption = screens::payment_caption(&txn, &self.settings.upi_id);
        let keyboard = screens::payment_keyboard(&txn);
        session.state = SessionState::AwaitingPayment;
        session.transaction = Some(txn);
        self.sessions.set(user.id, session);

        self.gateway
            .send_photo(chat_id, png, &caption, keyboard)
            .await?;
        Ok(())
    }

    /// Verify the (simulated) payment, patch the transaction, and show the
    /// outcome screen. Either outcome logically resets the flow.
    async fn process_payment_done(
        &self,
        chat_id: &str,
        user: &User,
        transaction_id: i64,
    ) -> Result<(), BotError> {
        let mut session = self.sessions.get_or_default(user.id);
        let txn = match session.transaction.clone() {
            Some(txn) if txn.id == transaction_id => txn,
            _ => {
                // Tap from an old message, or the single-attempt mode
                // already retired this transaction.
                self.gateway
                    .send_message(chat_id, &screens::already_processed_text())
                    .await?;
                return Ok(());
            }
        };

        let success = self.verifier.verify(transaction_id);
        let status = if success {
            TransactionStatus::Completed
        } else {
            TransactionStatus::Failed
        };
        if let Err(e) = self.api.update_status(transaction_id, status).await {
            tracing::error!("Failed to update transaction {}: {}", transaction_id, e);
        }

        if self.settings.allow_retry {
            // Keep the transaction so another tap re-runs verification.
            session.state = SessionState::Welcome;
            self.sessions.set(user.id, session);
        } else {
            // Terminal state: drop the session outright.
            self.sessions.remove(user.id);
        }

        if success {
            self.gateway
                .send_with_keyboard(
                    chat_id,
                    &screens::payment_success_text(&txn),
                    screens::payment_success_keyboard(),
                )
                .await?;
        } else {
            self.gateway
                .send_with_keyboard(
                    chat_id,
                    &screens::payment_failed_text(),
                    screens::payment_failed_keyboard(),
                )
                .await?;
        }
        Ok(())
    }

    async fn show_status(&self, chat_id: &str, user: &User) -> Result<(), BotError> {
        let text = match self.api.list_transactions().await {
            Ok(all) => {
                let wanted = user.id.to_string();
                let mut mine: Vec<Transaction> = all
                    .into_iter()
                    .filter(|t| t.telegram_user_id == wanted)
                    .collect();
                mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                screens::status_text(&mine)
            }
            Err(e) => {
                tracing::error!("Failed to fetch transactions: {}", e);
                screens::status_unavailable_text()
            }
        };
        self.gateway
            .send_with_keyboard(chat_id, &text, screens::status_keyboard())
            .await?;
        Ok(())
    }

    async fn show_group_links(&self, chat_id: &str) -> Result<(), BotError> {
        match self.api.list_group_links().await {
            Ok(links) => {
                let active: Vec<_> = links.into_iter().filter(|l| l.is_active()).collect();
                if active.is_empty() {
                    self.gateway
                        .send_with_keyboard(
                            chat_id,
                            &screens::group_links_text(&active),
                            screens::main_menu_keyboard(),
                        )
                        .await?;
                } else {
                    self.gateway
                        .send_with_keyboard(
                            chat_id,
                            &screens::group_links_text(&active),
                            screens::group_links_keyboard(&active),
                        )
                        .await?;
                }
            }
            Err(e) => {
                tracing::error!("Failed to fetch group links: {}", e);
                self.gateway
                    .send_with_keyboard(
                        chat_id,
                        &screens::links_unavailable_text(),
                        screens::main_menu_keyboard(),
                    )
                    .await?;
            }
        }
        Ok(())
    }
}
