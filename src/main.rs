//! TayoZanX CLI: run a script file or an inline snippet.

use std::env;
use std::path::{Path, PathBuf};
use std::process;

use colored::Colorize;

use tayozanx::config::Config;
use tayozanx::error::TayoError;
use tayozanx::ExecutionMode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI command to execute.
enum Command {
    /// Run a script file
    Run { file: String },
    /// Evaluate a string
    Eval { code: String },
}

/// CLI options parsed from arguments.
struct Options {
    command: Command,
    mode: ExecutionMode,
    strict: bool,
    config: Option<PathBuf>,
    disassemble: bool,
}

fn print_usage() {
    eprintln!("TayoZanX {}", VERSION);
    eprintln!();
    eprintln!("Usage: tzx [options] <script.tzx>");
    eprintln!("       tzx [options] -e <code>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --mode MODE      tree, vm or both (default: both)");
    eprintln!("  --strict         Reject unrecognized lines");
    eprintln!("  --config FILE    Use FILE instead of the nearest tayozanx.yaml");
    eprintln!("  --disassemble    Print bytecode before running it on the VM");
    eprintln!("  -e <code>        Run code given on the command line");
    eprintln!("  --version, -V    Show version");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  tzx hello.tzx");
    eprintln!("  tzx --mode tree game.tasx");
    eprintln!("  tzx -e 'show 1 + 1'");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace lexing, parsing and compilation.");
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    print_usage();
    process::exit(64);
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut command = None;
    let mut mode = ExecutionMode::default();
    let mut strict = false;
    let mut config = None;
    let mut disassemble = false;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--version" | "-V" => {
                println!("tzx {}", VERSION);
                process::exit(0);
            }
            "--mode" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    usage_error("--mode requires a value");
                };
                mode = value.parse().unwrap_or_else(|e: String| usage_error(&e));
            }
            "--strict" => strict = true,
            "--disassemble" => disassemble = true,
            "--config" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    usage_error("--config requires a file");
                };
                config = Some(PathBuf::from(value));
            }
            "-e" => {
                i += 1;
                let Some(code) = args.get(i) else {
                    usage_error("-e requires a code argument");
                };
                if command.is_some() {
                    usage_error("Only one script or -e snippet can be given");
                }
                command = Some(Command::Eval { code: code.clone() });
            }
            _ if arg.starts_with('-') => usage_error(&format!("Unknown option: {}", arg)),
            _ => {
                if command.is_some() {
                    usage_error("Only one script or -e snippet can be given");
                }
                command = Some(Command::Run { file: arg.clone() });
            }
        }
        i += 1;
    }

    let Some(command) = command else {
        usage_error("No script given");
    };

    Options {
        command,
        mode,
        strict,
        config,
        disassemble,
    }
}

fn main() {
    env_logger::init();
    let options = parse_args();

    let result = match &options.command {
        Command::Run { file } => run_file(Path::new(file), &options),
        Command::Eval { code } => run_eval(code, &options),
    };

    if let Err(e) = result {
        report(&e);
        process::exit(1);
    }
}

fn run_file(path: &Path, options: &Options) -> Result<(), TayoError> {
    let search_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = load_config(options, search_dir)?;
    tayozanx::run_file(path, &config, options.mode, options.disassemble)
}

fn run_eval(code: &str, options: &Options) -> Result<(), TayoError> {
    let cwd = env::current_dir()?;
    let config = load_config(options, &cwd)?;
    tayozanx::run_with_options(code, &config, options.mode, options.disassemble)
}

/// An explicit `--config` wins; otherwise the nearest tayozanx.yaml, if any.
fn load_config(options: &Options, search_dir: &Path) -> Result<Config, TayoError> {
    let path = match &options.config {
        Some(path) => Some(path.clone()),
        None => Config::discover(search_dir),
    };

    let mut config = match path {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    config.strict |= options.strict;
    Ok(config)
}

fn report(error: &TayoError) {
    eprintln!(
        "{} {}",
        format!("❌ Error {}:", error.code()).red().bold(),
        error
    );
    if let Some(hint) = error.hint() {
        eprintln!("{} {}", "💡 Hint:".yellow(), hint);
    }
}
