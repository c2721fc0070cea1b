//! main.rs
//! Entry point for filesum

use filesum::app::AppState;
use filesum::config::Config;
use filesum::core::terminal;
use filesum::utils::cli::{CliAction, handle_args};
use filesum::utils::logging::init_logging;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[filesum] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    match handle_args() {
        CliAction::RunApp => {}
        CliAction::Exit => return Ok(()),
        CliAction::Invalid => std::process::exit(2),
    }

    let config = Config::load();

    if let Err(e) = init_logging(config.general()) {
        eprintln!("[filesum] Warning: logging disabled: {}", e);
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let cwd = std::env::current_dir()?;
    let mut app = match AppState::from_project(&config, &cwd) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "enumeration failed");
            eprintln!("[filesum] Error: {}", e);
            std::process::exit(1);
        }
    };

    terminal::run_terminal(&mut app)
}
