// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;

use homehub::report::render_summary;
use homehub::{logging, AppConfig, HomeHub};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = AppConfig::from_env();

    if args.len() > 1 && args[1] == "summary" {
        // One-shot text summary
        run_summary()?;
    } else {
        // UI mode (default)
        run_ui_mode(&config)?;
    }

    Ok(())
}

fn run_summary() -> Result<()> {
    let app = HomeHub::default();
    print!("{}", render_summary(&app));
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    use anyhow::Context;
    use homehub::Advisor;

    let _log_guard = logging::init_file_logging(&config.log_dir)?;
    tracing::info!(version = homehub::VERSION, "starting HomeHub TUI");

    // Advisor calls run here while the UI loop stays on the main thread
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let mut app = HomeHub::default();
    let advisor = Advisor::from_config(&config.advisor, &app.home);
    app.advisor_online = advisor.is_configured();

    ui::run_ui(&mut app, advisor, runtime.handle().clone())?;

    tracing::info!("HomeHub TUI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    logging::init_stderr_logging()?;
    tracing::warn!(log_dir = ?config.log_dir, "TUI feature disabled at build time");
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin homehub-server --features server");
    eprintln!("   Or print a summary: homehub summary");
    std::process::exit(1);
}
