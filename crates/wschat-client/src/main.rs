//! wschat terminal client.
//!
//! - Config: first argument, default `wschat.yaml`
//! - stdin lines -> `Command`s (a keystroke precedes each chat line)
//! - Output through `TerminalUi`

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, EnvFilter};

use wschat_client::ui::TerminalUi;
use wschat_client::{config, ChatClient, Command};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "wschat.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, "config load failed");
            std::process::exit(2);
        }
    };

    let (tx, mut rx) = mpsc::channel::<Command>(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let Some(cmd) = Command::parse_line(&line) else {
                continue;
            };
            if matches!(cmd, Command::Say(_)) && tx.send(Command::Keystroke).await.is_err() {
                break;
            }
            if tx.send(cmd).await.is_err() {
                break;
            }
        }
    });

    let ui = TerminalUi::new(cfg.user.username.clone());
    tracing::info!(user = %cfg.user.username, server = %cfg.server.address, "wschat starting");
    let mut client = ChatClient::new(cfg, ui);
    if let Err(e) = client.run(&mut rx).await {
        tracing::error!(code = e.code().as_str(), error = %e, "client stopped");
        std::process::exit(1);
    }
}
