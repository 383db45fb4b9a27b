//! EduChain CLI - inspect and change the persisted client session
//!
//!   educhain status               → {"address", "short", "connected", "theme"}
//!   educhain theme                → {"theme"}
//!   educhain theme toggle         → {"theme"} after toggling
//!   educhain connect <address>    → connect through a manual (static) wallet
//!   educhain disconnect           → {"connected": false}
//!
//! Options:
//!   --app <name>   Storage namespace (default: educhain, env EDUCHAIN_APP)
//!   --memory       Use throwaway in-memory storage
//!   --json         Output compact JSON (default for non-tty)
//!   --pretty       Pretty-print JSON (default for tty)

use anyhow::{anyhow, bail, Context};
use educhain::logging::init_logging;
use educhain::{Installed, NoWallet, ProviderSource, Session, SessionConfig, StaticWallet, StorageMode};
use serde_json::{json, Value};
use std::env;
use std::io::IsTerminal;
use std::rc::Rc;
use tracing::debug;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("educhain {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("status") => cmd_status(&opts),
        Some("theme") => cmd_theme(&opts),
        Some("connect") => cmd_connect(&opts),
        Some("disconnect") => cmd_disconnect(&opts),
        Some(cmd) => Err(anyhow!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || (!opts.json && std::io::stdout().is_terminal());
    match result {
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": format!("{:#}", e)}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    positional: Vec<String>,
    app: Option<String>,
    memory: bool,
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        load_dotenv();

        let mut opts = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-h" | "--help" => opts.help = true,
                "-V" | "--version" => opts.version = true,
                "--json" => opts.json = true,
                "--pretty" => opts.pretty = true,
                "--memory" => opts.memory = true,
                "--app" => opts.app = iter.next().cloned(),
                _ if opts.command.is_none() => opts.command = Some(arg.clone()),
                _ => opts.positional.push(arg.clone()),
            }
        }
        opts
    }
}

/// Load `KEY=value` lines from `./.env` without overriding the environment.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"');
            if !value.is_empty() && env::var(key.trim()).is_err() {
                env::set_var(key.trim(), value);
            }
        }
    }
}

fn print_usage() {
    println!(
        r#"educhain - EduChain client session

USAGE:
    educhain <command> [options]

COMMANDS:
    status                 Show wallet session and theme
    theme [toggle]         Show (or toggle) the theme preference
    connect <address>      Store an account as the connected wallet
    disconnect             Forget the connected wallet

OPTIONS:
    --app <name>           Storage namespace (env EDUCHAIN_APP)
    --memory               Use in-memory storage (nothing is saved)
    --json                 Compact JSON output
    --pretty               Pretty JSON output
    -h, --help             Show this help
    -V, --version          Show version

ENVIRONMENT:
    EDUCHAIN_ROOT          Data directory root
    EDUCHAIN_STORAGE       persistent | memory
    EDUCHAIN_LOG           Log filter (falls back to RUST_LOG)
    EDUCHAIN_LOG_JSON=1    JSON log lines on stderr"#
    );
}

fn config(opts: &ParsedArgs) -> anyhow::Result<SessionConfig> {
    let mut config = SessionConfig::from_env()?;
    if let Some(app) = &opts.app {
        config.app = app.clone();
    }
    if opts.memory {
        config.storage = StorageMode::Memory;
    }
    Ok(config)
}

fn open_session(opts: &ParsedArgs, source: Rc<dyn ProviderSource>) -> anyhow::Result<Session> {
    let config = config(opts)?;
    debug!(app = %config.app, storage = config.storage.as_str(), "opening session");
    Session::from_config(&config, source).context("open session")
}

fn cmd_status(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let session = open_session(opts, Rc::new(NoWallet))?;
    Ok(serde_json::to_value(session.snapshot())?)
}

fn cmd_theme(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let session = open_session(opts, Rc::new(NoWallet))?;
    let theme = match opts.positional.first().map(String::as_str) {
        None => session.theme().theme(),
        Some("toggle") => session.theme().toggle_theme(),
        Some(other) => bail!("Unknown theme action: {} (expected 'toggle')", other),
    };
    Ok(json!({"theme": theme}))
}

fn cmd_connect(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let address = opts
        .positional
        .first()
        .ok_or_else(|| anyhow!("connect requires an <address>"))?;
    let source = Installed::new(StaticWallet::accounts([address.clone()]));
    let session = open_session(opts, Rc::new(source))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("tokio runtime")?;
    let address = runtime.block_on(session.wallet().connect())?;

    Ok(json!({
        "address": address,
        "short": educhain::short_address(&address),
        "connected": true,
    }))
}

fn cmd_disconnect(opts: &ParsedArgs) -> anyhow::Result<Value> {
    let session = open_session(opts, Rc::new(NoWallet))?;
    session.wallet().disconnect();
    Ok(json!({"connected": false}))
}
