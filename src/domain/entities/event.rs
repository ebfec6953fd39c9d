//! Inbound event model - commands, button taps, and free text
//!
//! Callback data arrives from the platform as opaque strings
//! (`amount_500`, `payment_done_7`, ...). They are decoded into a closed
//! enum here, once, at the boundary; the conversation core only ever
//! matches on typed variants.

/// A slash command recognized by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Escrow,
    Status,
    Help,
    Unknown(String),
}

impl BotCommand {
    /// Parse `/command` or `/command@BotName` text
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('/')?;
        let name = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .split('@')
            .next()
            .unwrap_or("");
        Some(match name {
            "start" => BotCommand::Start,
            "escrow" => BotCommand::Escrow,
            "status" => BotCommand::Status,
            "help" => BotCommand::Help,
            other => BotCommand::Unknown(other.to_string()),
        })
    }
}

/// A decoded inline-keyboard button tap
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    StartEscrow,
    /// A preset amount button (`amount_500`)
    Amount(u64),
    /// The "custom amount" button
    AmountCustom,
    /// Payment confirmation carrying the transaction's internal id
    PaymentDone(i64),
    Cancel,
    CheckStatus,
    GroupLinks,
    Help,
    Support,
}

impl CallbackAction {
    /// Decode raw callback data; unknown or malformed data yields `None`
    /// and the tap is ignored upstream.
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "start_escrow" => Some(CallbackAction::StartEscrow),
            "amount_custom" => Some(CallbackAction::AmountCustom),
            "cancel" => Some(CallbackAction::Cancel),
            "check_status" => Some(CallbackAction::CheckStatus),
            "group_links" => Some(CallbackAction::GroupLinks),
            "help" => Some(CallbackAction::Help),
            "support" => Some(CallbackAction::Support),
            _ => {
                if let Some(amount) = data.strip_prefix("amount_") {
                    amount.parse().ok().map(CallbackAction::Amount)
                } else if let Some(id) = data.strip_prefix("payment_done_") {
                    id.parse().ok().map(CallbackAction::PaymentDone)
                } else {
                    None
                }
            }
        }
    }
}

/// Any inbound event the conversation core can react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(BotCommand),
    Callback(CallbackAction),
    Text(String),
}

impl Event {
    /// Classify a plain message's text as a command or free text
    pub fn from_text(text: &str) -> Self {
        match BotCommand::parse(text) {
            Some(cmd) => Event::Command(cmd),
            None => Event::Text(text.to_string()),
        }
    }
}
