//! Screen rendering - message templates and keyboard layouts
//!
//! Pure functions from domain data to outbound text and buttons. Keeping
//! these out of the state machine keeps transition logic readable and lets
//! tests assert on rendered output directly.

use chrono::Utc;

use crate::domain::entities::{GroupLink, Transaction, TransactionStatus};
use crate::domain::traits::KeyboardButton;

pub fn welcome_text() -> String {
    "🛡️ **Welcome to QuickEscrowBot!** ⚡\n\n\
     🔹 *Secure* • *Fast* • *Reliable* Escrow Service\n\n\
     Let's get started on your secure transaction journey! 💸\n\n\
     Choose an option below to begin:"
        .to_string()
}

pub fn welcome_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![
        vec![
            KeyboardButton::new("🚀 Start Escrow").with_callback("start_escrow"),
            KeyboardButton::new("📊 Check Status").with_callback("check_status"),
        ],
        vec![
            KeyboardButton::new("🔗 Group Links").with_callback("group_links"),
            KeyboardButton::new("❓ Help").with_callback("help"),
        ],
    ]
}

pub fn amount_text() -> String {
    "💰 **Select Escrow Amount**\n\n\
     Choose from quick options below or enter a custom amount:"
        .to_string()
}

pub fn amount_keyboard(presets: &[u64]) -> Vec<Vec<KeyboardButton>> {
    let glyphs = ["💰", "💵", "💎"];
    let mut rows: Vec<Vec<KeyboardButton>> = Vec::new();
    let mut row: Vec<KeyboardButton> = Vec::new();
    for (i, amount) in presets.iter().enumerate() {
        let glyph = glyphs.get(i).unwrap_or(&"💰");
        row.push(
            KeyboardButton::new(format!("{} Rs. {}", glyph, amount))
                .with_callback(format!("amount_{}", amount)),
        );
        if row.len() == 2 {
            rows.push(std::mem::take(&mut row));
        }
    }
    row.push(KeyboardButton::new("📝 Custom Amount").with_callback("amount_custom"));
    rows.push(row);
    rows.push(vec![KeyboardButton::new("❌ Cancel").with_callback("cancel")]);
    rows
}

pub fn custom_amount_prompt() -> String {
    "📝 Please enter the amount in Rs. (e.g., 750):".to_string()
}

pub fn invalid_amount_text() -> String {
    "❌ Please enter a valid amount greater than 0.".to_string()
}

pub fn not_a_number_text() -> String {
    "❌ Please enter a valid number.".to_string()
}

pub fn payment_caption(txn: &Transaction, upi_id: &str) -> String {
    format!(
        "💳 **Scan to Pay!**\n\n\
         🔹 **Amount:** Rs. {}\n\
         🔹 **UPI ID:** {}\n\
         🔹 **Transaction ID:** {}\n\n\
         📱 Scan the QR code below to complete payment:",
        txn.amount, upi_id, txn.transaction_id
    )
}

pub fn payment_keyboard(txn: &Transaction) -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("✅ Payment Done").with_callback(format!("payment_done_{}", txn.id)),
        KeyboardButton::new("❌ Cancel").with_callback("cancel"),
    ]]
}

pub fn create_failed_text() -> String {
    "❌ Failed to create transaction. Please try again.".to_string()
}

pub fn qr_failed_text() -> String {
    "❌ Failed to generate QR code. Please try again.".to_string()
}

pub fn retry_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("🔄 Retry").with_callback("start_escrow"),
    ]]
}

pub fn payment_success_text(txn: &Transaction) -> String {
    format!(
        "✅ **Payment Successful!**\n\n\
         🎉 Your escrow transaction is now active! ✨\n\n\
         **Transaction Details:**\n\
         • Amount: Rs. {}\n\
         • Status: Escrowed\n\
         • Transaction ID: {}\n\
         • Date: {}\n\n\
         Thank you for using QuickEscrowBot! 🛡️",
        txn.amount,
        txn.transaction_id,
        Utc::now().format("%Y-%m-%d %H:%M")
    )
}

pub fn payment_success_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("🔄 New Transaction").with_callback("start_escrow"),
        KeyboardButton::new("📊 View Status").with_callback("check_status"),
    ]]
}

pub fn payment_failed_text() -> String {
    "❌ **Payment Failed**\n\n\
     Sorry, we couldn't verify your payment. Please try again or contact support.\n\n\
     Possible reasons:\n\
     • Payment amount mismatch\n\
     • Network connectivity issues\n\
     • Payment gateway timeout\n\n\
     You can retry the payment or contact our support team."
        .to_string()
}

pub fn payment_failed_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("🔄 Retry Payment").with_callback("start_escrow"),
        KeyboardButton::new("📞 Contact Support").with_callback("support"),
    ]]
}

pub fn already_processed_text() -> String {
    "ℹ️ This payment has already been processed. Start a new transaction with /escrow."
        .to_string()
}

/// Status listing, newest-first, capped at 5
pub fn status_text(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "📊 No transactions found.\n\nUse /escrow to start your first transaction!"
            .to_string();
    }
    let mut text = "📊 **Your Recent Transactions:**\n\n".to_string();
    for txn in transactions.iter().take(5) {
        text.push_str(&format!(
            "{} **{}**\n   Amount: Rs. {}\n   Status: {}\n   Date: {}\n\n",
            TransactionStatus::glyph(&txn.status),
            txn.transaction_id,
            txn.amount,
            TransactionStatus::title_case(&txn.status),
            txn.created_date()
        ));
    }
    text
}

pub fn status_unavailable_text() -> String {
    "❌ Unable to fetch transaction status. Please try again later.".to_string()
}

pub fn status_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("🚀 New Transaction").with_callback("start_escrow"),
        KeyboardButton::new("🏠 Main Menu").with_callback("cancel"),
    ]]
}

pub fn help_text() -> String {
    "❓ **QuickEscrowBot Help**\n\n\
     **Available Commands:**\n\
     • `/start` - Welcome message and main menu\n\
     • `/escrow` - Start new escrow transaction\n\
     • `/status` - Check your transaction status\n\
     • `/help` - Show this help message\n\n\
     **How it works:**\n\
     1️⃣ Choose an amount or enter custom amount\n\
     2️⃣ Scan the QR code to make payment\n\
     3️⃣ Confirm payment completion\n\
     4️⃣ Funds are held securely in escrow\n\n\
     **Need Support?**\n\
     Contact: @quickescrow_support"
        .to_string()
}

pub fn help_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("🚀 Start Transaction").with_callback("start_escrow"),
        KeyboardButton::new("🏠 Main Menu").with_callback("cancel"),
    ]]
}

pub fn group_links_text(links: &[GroupLink]) -> String {
    if links.is_empty() {
        return "🔗 No group links available at the moment.".to_string();
    }
    let mut text = "🔗 **Available Group Links:**\n\n".to_string();
    for link in links {
        text.push_str(&format!("• {}\n", link.name));
    }
    text
}

pub fn links_unavailable_text() -> String {
    "❌ Unable to fetch group links.".to_string()
}

/// One URL button per active link, main-menu button last
pub fn group_links_keyboard(links: &[GroupLink]) -> Vec<Vec<KeyboardButton>> {
    let mut rows: Vec<Vec<KeyboardButton>> = links
        .iter()
        .map(|link| {
            vec![KeyboardButton::new(format!("📱 {}", link.name)).with_url(link.url.clone())]
        })
        .collect();
    rows.push(main_menu_keyboard_row());
    rows
}

fn main_menu_keyboard_row() -> Vec<KeyboardButton> {
    vec![KeyboardButton::new("🏠 Main Menu").with_callback("cancel")]
}

pub fn main_menu_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![main_menu_keyboard_row()]
}

pub fn support_text() -> String {
    "📞 **Contact Support**\n\n\
     For assistance with your transactions or any issues:\n\n\
     **Support Channels:**\n\
     • Telegram: @quickescrow_support\n\
     • Email: support@quickescrow.com\n\
     • Website: https://quickescrow.com/support\n\n\
     **Emergency Support:**\n\
     Available 24/7 for critical transaction issues\n\n\
     We're here to help! 🛡️"
        .to_string()
}

pub fn support_keyboard() -> Vec<Vec<KeyboardButton>> {
    vec![vec![
        KeyboardButton::new("📱 Contact Support").with_url("https://t.me/quickescrow_support"),
        KeyboardButton::new("🏠 Main Menu").with_callback("cancel"),
    ]]
}

pub fn nudge_text() -> String {
    "👋 Hi! Use /start to begin or /help for assistance.".to_string()
}

pub fn apology_text() -> String {
    "❌ An error occurred. Please try again.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txn(amount: u64, status: &str, created: &str) -> Transaction {
        Transaction {
            id: 1,
            transaction_id: format!("TXN-{}", amount),
            telegram_user_id: "42".into(),
            amount,
            status: status.into(),
            qr_code_data: String::new(),
            created_at: created.into(),
        }
    }

    #[test]
    fn welcome_menu_has_four_navigation_actions() {
        let buttons: usize = welcome_keyboard().iter().map(|r| r.len()).sum();
        assert_eq!(buttons, 4);
    }

    #[test]
    fn amount_menu_has_presets_custom_and_cancel() {
        let rows = amount_keyboard(&[100, 500, 1000]);
        let all: Vec<_> = rows.iter().flatten().collect();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].callback_data.as_deref(), Some("amount_100"));
        assert_eq!(all[3].callback_data.as_deref(), Some("amount_custom"));
        assert_eq!(all[4].callback_data.as_deref(), Some("cancel"));
    }

    #[test]
    fn status_caps_at_five_entries() {
        let txns: Vec<_> = (1..=7)
            .map(|i| txn(i * 100, "pending", "2024-05-01T00:00:00Z"))
            .collect();
        let text = status_text(&txns);
        assert_eq!(text.matches("Amount: Rs.").count(), 5);
    }

    #[test]
    fn status_glyphs_follow_status() {
        let text = status_text(&[
            txn(100, "completed", "2024-05-02T00:00:00Z"),
            txn(200, "weird", "2024-05-01T00:00:00Z"),
        ]);
        assert!(text.contains("✅"));
        assert!(text.contains("⚪"));
        assert!(text.contains("Status: Weird"));
        assert!(text.contains("Date: 2024-05-02"));
    }

    #[test]
    fn group_links_keyboard_uses_urls() {
        let links = vec![GroupLink {
            name: "Traders".into(),
            url: "https://t.me/traders".into(),
            is_active: Some(true),
        }];
        let rows = group_links_keyboard(&links);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0].url.as_deref(), Some("https://t.me/traders"));
        assert!(rows[0][0].callback_data.is_none());
        assert_eq!(rows[1][0].callback_data.as_deref(), Some("cancel"));
    }

    #[test]
    fn payment_caption_shows_amount_and_display_id() {
        let t = txn(750, "pending", "");
        let caption = payment_caption(&t, "quickescrow@upi");
        assert!(caption.contains("Rs. 750"));
        assert!(caption.contains("TXN-750"));
        assert!(caption.contains("quickescrow@upi"));
    }
}
