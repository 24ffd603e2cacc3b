use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use agrichain_core::config::Config;
use agrichain_core::state::UiTheme;
use agrichain_core::state::DEFAULT_REQUEST;
use agrichain_driver::driver::Timings;
use agrichain_driver::planner::FallbackPlanner;
use agrichain_driver::planner::FilePlanProvider;
use agrichain_driver::planner::PlanProvider;
use agrichain_driver::session::RunSession;

mod ui;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Some(first) = args.first() {
        match first.as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" | "version" => {
                println!("agrichain {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {}
        }
    }

    let options = parse_args(args)?;
    let config = load_config();

    let request = options
        .request
        .or_else(|| config.run.default_request.clone())
        .unwrap_or_else(|| DEFAULT_REQUEST.to_string());
    let plan_file = options
        .plan_file
        .or_else(|| config.run.plan_file.as_deref().map(PathBuf::from));
    let provider: Arc<dyn PlanProvider> = match plan_file {
        Some(path) => Arc::new(FilePlanProvider { path }),
        None => Arc::new(FallbackPlanner),
    };
    let theme = config
        .ui
        .theme
        .as_deref()
        .and_then(UiTheme::from_label)
        .unwrap_or(UiTheme::Classic);

    let session = RunSession::new(provider, Timings::default());
    ui::run(session, ui::UiOptions { theme, request })
}

struct CliArgs {
    request: Option<String>,
    plan_file: Option<PathBuf>,
}

fn parse_args(args: Vec<String>) -> Result<CliArgs, Box<dyn std::error::Error>> {
    let mut request = None;
    let mut plan_file = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--request" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--request requires a value".into());
                };
                request = Some(value.clone());
                i += 2;
            }
            "--plan-file" => {
                let Some(value) = args.get(i + 1) else {
                    return Err("--plan-file requires a path".into());
                };
                plan_file = Some(PathBuf::from(value));
                i += 2;
            }
            other => {
                return Err(format!("unsupported argument: {other}").into());
            }
        }
    }
    Ok(CliArgs { request, plan_file })
}

fn load_config() -> Config {
    let Some(dir) = dirs::config_dir() else {
        return Config::default();
    };
    let path = dir.join("agrichain").join("config.toml");
    match fs::read_to_string(&path) {
        Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

fn print_help() {
    println!("agrichain {}", env!("CARGO_PKG_VERSION"));
    println!("Usage:");
    println!("  agrichain [--request TEXT] [--plan-file PATH]");
    println!("  agrichain --help");
    println!("  agrichain --version");
}
