//! main.rs
//! Entry point for tuneq

use tuneq::app::EqPanel;
use tuneq::config::Config;
use tuneq::core::{EqNotifier, Vars, eqf, terminal};
use tuneq::utils::cli::{CliAction, handle_args};
use tuneq::utils::logging::init_logger;

use ratatui::layout::Rect;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        eprintln!("\n[tuneq] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    if let CliAction::Exit = action {
        return Ok(());
    }

    init_logger();

    let config = Config::load();
    let mut store = Vars::load(&config.vars_path());
    let (notifier, events) = EqNotifier::channel();

    if let CliAction::RunAppWithPreset(preset) = &action {
        eqf::load_preset(&mut store, &notifier, preset);
    }

    let (width, height) = crossterm::terminal::size()?;
    let mut panel = match EqPanel::open(Rect::new(0, 0, width, height), store, notifier, &config)
    {
        Ok(panel) => panel,
        Err(e) => {
            eprintln!("\n[tuneq] Error: {}", e);
            std::process::exit(1);
        }
    };

    terminal::run_terminal(&mut panel, &config, &events)
}
