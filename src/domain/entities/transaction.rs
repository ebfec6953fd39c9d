use serde::{Deserialize, Serialize};

/// Lifecycle status of an escrow transaction, owned by the external API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Glyph shown in the status listing
    pub fn glyph(status: &str) -> &'static str {
        match status {
            "pending" => "⏳",
            "completed" => "✅",
            "failed" => "❌",
            _ => "⚪",
        }
    }

    /// "pending" -> "Pending"
    pub fn title_case(status: &str) -> String {
        let mut chars = status.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// An escrow transaction as returned by the external API.
///
/// The bot never mutates these directly; it requests creation and status
/// patches through the API client and renders what comes back. Unknown
/// status strings are kept as-is so a listing never fails to render.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub transaction_id: String,
    #[serde(default)]
    pub telegram_user_id: String,
    pub amount: u64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub qr_code_data: String,
    #[serde(default)]
    pub created_at: String,
}

impl Transaction {
    /// Date portion of the creation timestamp, as stored by the API
    pub fn created_date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }
}

/// Request body for creating a transaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub telegram_user_id: String,
    pub telegram_username: String,
    pub amount: u64,
    pub payment_method: String,
}

impl NewTransaction {
    pub fn upi(user_id: i64, username: impl Into<String>, amount: u64) -> Self {
        Self {
            telegram_user_id: user_id.to_string(),
            telegram_username: username.into(),
            amount,
            payment_method: "upi".to_string(),
        }
    }
}

/// A community group link, read-only to the bot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupLink {
    pub name: String,
    pub url: String,
    /// Absent flag counts as active
    pub is_active: Option<bool>,
}

impl GroupLink {
    pub fn is_active(&self) -> bool {
        self.is_active.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_deserializes_from_api_json() {
        let json = r#"{
            "id": 7,
            "transactionId": "TXN-2024-007",
            "telegramUserId": "12345",
            "amount": 500,
            "status": "pending",
            "qrCodeData": "upi://pay?pa=quickescrow@upi&am=500",
            "createdAt": "2024-05-01T10:30:00Z"
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.id, 7);
        assert_eq!(txn.amount, 500);
        assert_eq!(txn.created_date(), "2024-05-01");
    }

    #[test]
    fn unknown_status_gets_default_glyph() {
        assert_eq!(TransactionStatus::glyph("refunded"), "⚪");
        assert_eq!(TransactionStatus::glyph("completed"), "✅");
    }

    #[test]
    fn group_link_without_flag_is_active() {
        let link: GroupLink =
            serde_json::from_str(r#"{"name": "Traders", "url": "https://t.me/traders"}"#).unwrap();
        assert!(link.is_active());
    }

    #[test]
    fn new_transaction_serializes_camel_case() {
        let body = NewTransaction::upi(12345, "alice", 750);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["telegramUserId"], "12345");
        assert_eq!(json["paymentMethod"], "upi");
    }
}
