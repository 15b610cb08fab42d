use chat_simple::error::{AppError, ConfigError};
use chat_simple::utils::RUNTIME;
use chat_simple::AppConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

struct Args {
    config: Option<PathBuf>,
    contacts: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, ConfigError> {
    let usage = || {
        ConfigError::invalid(format!(
            "Usage: {} [--config <path>] [--contacts <path>]",
            args.first().map(String::as_str).unwrap_or("chat-simple")
        ))
    };
    let mut out = Args {
        config: None,
        contacts: None,
    };
    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1).map(PathBuf::from);
        match args[i].as_str() {
            "--config" => out.config = Some(value.ok_or_else(usage)?),
            "--contacts" => out.contacts = Some(value.ok_or_else(usage)?),
            _ => return Err(usage()),
        }
        i += 2;
    }
    Ok(out)
}

fn run() -> Result<(), AppError> {
    let args: Vec<String> = std::env::args().collect();
    let args = parse_args(&args)?;
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_env();
    RUNTIME.block_on(chat_simple::ui::run(config, args.config, args.contacts))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
