mod broadcaster;
mod config;
mod local_game;
mod state;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use common::config::Validate;
use common::{log, logger};
use tokio::sync::mpsc;

use config::get_config_manager;
use local_game::local_game_task;
use state::SharedState;
use ui::TicTacToeApp;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Print debug lines (search stats, rejected moves).
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured computer move delay.
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let config_manager = get_config_manager(args.config);
    let config = config_manager.get_config().unwrap_or_else(|e| {
        log!("Using default config: {}", e);
        config::Config::default()
    });

    let mut settings = config.match_settings;
    if let Some(delay_ms) = args.delay_ms {
        settings.computer_move_delay_ms = delay_ms;
    }
    settings.validate()?;

    let shared_state = SharedState::new();
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    let runtime = tokio::runtime::Runtime::new()?;
    let shared_state_clone = shared_state.clone();
    let game_thread = std::thread::spawn(move || {
        runtime.block_on(local_game_task(
            shared_state_clone,
            settings,
            config_manager,
            command_rx,
        ));
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([640.0, 560.0])
            .with_title("Tic-Tac-Toe"),
        ..Default::default()
    };

    let last_mode = config.last_mode;
    eframe::run_native(
        "Tic-Tac-Toe",
        options,
        Box::new(move |cc| {
            shared_state.set_repaint_context(cc.egui_ctx.clone());
            Ok(Box::new(TicTacToeApp::new(shared_state, command_tx, last_mode)))
        }),
    )?;

    if game_thread.join().is_err() {
        log!("Game thread panicked");
    }

    Ok(())
}
