//! Command-line argument handling for filesum.
//!
//! filesum takes no arguments: it always browses the git project in the current working
//! directory. A few informational flags are accepted and exit right away.

use crate::config::Config;
use crate::config::load::CONFIG_ENV;
use crate::utils::logging::LOG_ENV;

pub enum CliAction {
    RunApp,
    Exit,
    Invalid,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> CliAction {
    let [arg] = args else {
        if args.is_empty() {
            return CliAction::RunApp;
        }
        eprintln!("Error: filesum accepts at most one option.");
        eprintln!("Usage: filesum [OPTION]");
        return CliAction::Invalid;
    };

    match arg.as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--init" => {
            let path = Config::default_path();
            match Config::generate_default(&path) {
                Ok(()) => CliAction::Exit,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    CliAction::Invalid
                }
            }
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Invalid
        }
    }
}

fn print_version() {
    println!("filesum {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"filesum - browse the files of a git project and compute their sizes on demand

USAGE:
  filesum            Run in the current directory (must be a git project)

KEYS:
  enter              Compute the size of the selected file
  j / k, arrows      Move the cursor
  g / G              Jump to top / bottom
  /                  Fuzzy filter by path (esc clears)
  ?                  Show key bindings
  q, ctrl+c          Quit

OPTIONS:
      --init         Write a default configuration file
  -h, --help         Print help information
  -v, --version      Print the version

ENVIRONMENT:
  {CONFIG_ENV}     Override the config file path
  {LOG_ENV}        Tracing filter for the log file, e.g. filesum=debug
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_the_app() {
        assert!(matches!(parse_args(&[]), CliAction::RunApp));
    }

    #[test]
    fn paths_and_extra_arguments_are_rejected() {
        assert!(matches!(parse_args(&args(&["some/dir"])), CliAction::Invalid));
        assert!(matches!(parse_args(&args(&["-h", "-v"])), CliAction::Invalid));
        assert!(matches!(parse_args(&args(&["--version"])), CliAction::Exit));
    }
}
