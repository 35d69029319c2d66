mod common;
mod config;
mod network;
mod session;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use common::SystemClock;
use config::EnvSnapshot;
use network::FunctionClient;
use session::SessionController;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "mcp_chat_client",
    version,
    about = "Chat client for an MCP function backend with managed identity auth"
)]
struct Cli {
    /// Backend base URL (falls back to FUNCTION_APP_URL, then the local default)
    #[arg(long, value_name = "URL")]
    function_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let function_url = config::resolve_function_url(cli.function_url);
    let env = EnvSnapshot::capture();

    run_client(function_url, env).await
}

async fn run_client(function_url: String, env: EnvSnapshot) -> Result<(), eframe::Error> {
    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Session
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Session -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    log::info!(
        "Function backend: {function_url} (managed environment: {})",
        env.is_managed()
    );

    // 2. Khởi chạy Session Task (Chạy ngầm)
    tokio::spawn(async move {
        let backend = FunctionClient::new(function_url, env);
        let controller =
            SessionController::new(backend, Box::new(SystemClock), event_tx, cmd_rx);
        controller.run().await;
    });

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "MCP Function Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
