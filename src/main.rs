use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use quick_escrow_bot::application::conversation::{screens, ConversationService};
use quick_escrow_bot::domain::entities::{CallbackAction, Event, User};
use quick_escrow_bot::domain::traits::ChatGateway;
use quick_escrow_bot::infrastructure::adapters::telegram::{TelegramAdapter, TgUser, Update};
use quick_escrow_bot::infrastructure::api::HttpEscrowApi;
use quick_escrow_bot::infrastructure::config::Config;
use quick_escrow_bot::infrastructure::qr::QrPngRenderer;
use quick_escrow_bot::infrastructure::sessions::InMemorySessionStore;
use quick_escrow_bot::infrastructure::verify::RandomVerifier;

#[derive(Parser)]
#[command(name = "quick-escrow-bot")]
#[command(about = "Telegram escrow bot with simulated payment verification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(cli.config, cli.token),
        Commands::Version => {
            println!("quick-escrow-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::InitConfig => init_config(cli.config),
    }
}

fn init_config(path: String) -> ExitCode {
    let config = Config::default();
    let yaml = match serde_yaml::to_string(&config) {
        Ok(yaml) => yaml,
        Err(e) => {
            tracing::error!("Failed to serialize default config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = std::fs::write(&path, yaml) {
        tracing::error!("Failed to write {}: {}", path, e);
        return ExitCode::FAILURE;
    }
    println!("Wrote default config to {}", path);
    ExitCode::SUCCESS
}

fn run_bot(config_path: String, token_override: Option<String>) -> ExitCode {
    // Load config
    let mut config = if std::path::Path::new(&config_path).exists() {
        match Config::load(&config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using environment", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.telegram.token = Some(token);
    }

    // Missing credentials are fatal at startup, not at first send.
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    tracing::info!("Starting {}", config.bot.name);

    let token = match config.require_token() {
        Ok(token) => token.to_string(),
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        let mut adapter = TelegramAdapter::new(token);

        if let Err(e) = adapter.fetch_bot_info().await {
            tracing::error!("Failed to fetch bot info: {}", e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = adapter.register_commands().await {
            tracing::warn!("Failed to register commands: {}", e);
        }
        tracing::info!("Bot started: @{}", adapter.info().username);

        let gateway: Arc<TelegramAdapter> = Arc::new(adapter);
        let service = ConversationService::new(
            gateway.clone(),
            Arc::new(HttpEscrowApi::new(config.api.base_url.clone())),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(RandomVerifier::new(config.payment.success_rate)),
            Arc::new(QrPngRenderer),
            config.conversation_settings(),
        );

        poll_loop(&gateway, &service, config.telegram.poll_timeout_seconds).await;
        ExitCode::SUCCESS
    })
}

async fn poll_loop(
    gateway: &Arc<TelegramAdapter>,
    service: &ConversationService,
    poll_timeout: i64,
) {
    let mut offset: i64 = 0;

    tracing::info!("Starting update loop...");

    loop {
        match gateway.get_updates(offset, poll_timeout).await {
            Ok(updates) => {
                if !updates.is_empty() {
                    offset = TelegramAdapter::get_next_offset(&updates);
                }
                for update in updates {
                    handle_update(gateway, service, update).await;
                }
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
}

fn to_user(from: &TgUser) -> User {
    let mut user = User::new(from.id);
    if let Some(ref username) = from.username {
        user = user.with_username(username.clone());
    }
    if let Some(ref first) = from.first_name {
        user = user.with_first_name(first.clone());
    }
    user
}

/// Translate one Telegram update into a domain event and dispatch it. This
/// is the per-event error boundary: whatever goes wrong is logged and
/// answered with an apology, never allowed to kill the loop.
async fn handle_update(
    gateway: &Arc<TelegramAdapter>,
    service: &ConversationService,
    update: Update,
) {
    let (chat_id, user, event) = if let Some(msg) = update.message {
        let (Some(text), Some(from)) = (msg.text, msg.from) else {
            return;
        };
        (msg.chat.id.to_string(), to_user(&from), Event::from_text(&text))
    } else if let Some(cb) = update.callback_query {
        // Ack first so the client stops its spinner whatever happens next.
        if let Err(e) = gateway.answer_callback(&cb.id, None).await {
            tracing::warn!("Failed to answer callback: {}", e);
        }
        let Some(data) = cb.data else { return };
        let Some(action) = CallbackAction::parse(&data) else {
            tracing::debug!("Ignoring unknown callback data: {}", data);
            return;
        };
        let chat_id = cb
            .message
            .as_ref()
            .map(|m| m.chat.id)
            .unwrap_or(cb.from.id)
            .to_string();
        (chat_id, to_user(&cb.from), Event::Callback(action))
    } else {
        return;
    };

    if let Err(e) = service.handle_event(&chat_id, &user, event).await {
        tracing::error!("Error handling update for chat {}: {}", chat_id, e);
        if let Err(e) = gateway.send_message(&chat_id, &screens::apology_text()).await {
            tracing::error!("Failed to send apology: {}", e);
        }
    }
}
