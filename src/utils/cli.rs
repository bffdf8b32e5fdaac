//! Command-line argument parsing and help for tuneq.
//!
//! This module handles all CLI flag parsing used for config initialization and help.
//!
//! When invoked with no args/flags (tq), tuneq simply opens the equalizer panel.

use crate::config::Config;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp,
    RunAppWithPreset(String),
    Exit,
}

/// What the command line asks for, before any side effect runs.
#[derive(Debug, PartialEq, Eq)]
enum CliRequest {
    Run(Option<String>),
    Version,
    Help,
    Keybinds,
    Init,
    Invalid(String),
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args) {
        CliRequest::Run(None) => CliAction::RunApp,
        CliRequest::Run(Some(preset)) => CliAction::RunAppWithPreset(preset),
        CliRequest::Version => {
            print_version();
            CliAction::Exit
        }
        CliRequest::Help => {
            print_help();
            CliAction::Exit
        }
        CliRequest::Keybinds => {
            print_keybinds();
            CliAction::Exit
        }
        CliRequest::Init => {
            if let Err(e) = Config::generate_default(&Config::default_path()) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        CliRequest::Invalid(msg) => {
            eprintln!("{}", msg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn parse_args(args: &[String]) -> CliRequest {
    match args {
        [] => CliRequest::Run(None),
        [arg] => match arg.as_str() {
            "--version" | "-v" => CliRequest::Version,
            "-h" | "--help" => CliRequest::Help,
            "--keybinds" | "--keybind" | "--key" => CliRequest::Keybinds,
            "--init" => CliRequest::Init,
            arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
                CliRequest::Run(Some(arg.to_string()))
            }
            arg => CliRequest::Invalid(format!("Unknown argument: {}", arg)),
        },
        _ => CliRequest::Invalid(
            "Error: tuneq accepts only one argument at a time.\nUsage: tq [PRESET] or tq [OPTION]"
                .to_string(),
        ),
    }
}

fn print_version() {
    println!("tuneq {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"tuneq - An 11-band equalizer panel for the terminal

USAGE:
  tq [PRESET]

PRESET:
  Winamp EQF preset file to apply before the panel opens

OPTIONS:
      --init              Generate the default configuration
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of tuneq

ENVIRONMENT:
  TUNEQ_CONFIG            Override the default config path
  RUST_LOG                Log filter for the log file (default: warn)
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  quit                      ["q", "Esc"]      (saves all bands)
  band_left                 ["h", "Left"]     (wraps around)
  band_right                ["l", "Right"]    (wraps around)
  gain_down                 ["j", "Down"]
  gain_up                   ["k", "Up"]
  load_preset               ["p"]
  help                      ["?"]

  Mouse:
    Left click on a slider sets its gain to the clicked height.

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   " ", "space", "back", "enter", "esc", "tab"

  Note:
    - Shorthand (c-, m-, s-) only works inside brackets <>.
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}
