use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use snapfall_fallback::telemetry::{self, LogFormat};
use snapfall_fallback::SnapshotConfig;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod commands;

fn cli() -> Command {
    Command::new("snapfall")
        .version(snapfall_fallback::VERSION)
        .about("Inspect and maintain recorded API snapshots")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Path to snapfall.toml"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines"),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the snapshot an endpoint resolves to")
                .arg(
                    Arg::new("endpoint")
                        .required(true)
                        .help("Endpoint with optional query, e.g. /leaderboard/?period=weekly"),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Load every known snapshot and report failures")
                .arg(dir_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("scrub")
                .about("Remove items mentioning configured terms from every fixture")
                .arg(dir_arg())
                .arg(
                    Arg::new("term")
                        .long("term")
                        .action(ArgAction::Append)
                        .help("Term to remove (repeatable); replaces scrub_terms from config"),
                ),
        )
        .subcommand(Command::new("catalog").about("List recorded endpoints and their fixtures"))
}

fn dir_arg() -> Arg {
    Arg::new("dir")
        .long("dir")
        .value_parser(clap::value_parser!(PathBuf))
        .help("Fixture directory (overrides config)")
}

fn load_config(matches: &ArgMatches, args: &ArgMatches) -> anyhow::Result<SnapshotConfig> {
    let path = args
        .try_get_one::<PathBuf>("config")
        .ok()
        .flatten()
        .or_else(|| matches.get_one::<PathBuf>("config"))
        .map(PathBuf::as_path);
    let mut config = SnapshotConfig::load_or_default(path).with_context(|| {
        let shown = path.unwrap_or(Path::new("<default>"));
        format!("loading config {}", shown.display())
    })?;
    if let Some(dir) = args.try_get_one::<PathBuf>("dir").ok().flatten() {
        config.fixture_dir.clone_from(dir);
    }
    Ok(config)
}

async fn run(matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    match matches.subcommand() {
        Some(("resolve", args)) => {
            let endpoint = args
                .get_one::<String>("endpoint")
                .context("endpoint is required")?;
            println!("{}", commands::resolve(endpoint));
            Ok(ExitCode::SUCCESS)
        }
        Some(("verify", args)) => {
            let config = load_config(matches, args)?;
            let report = commands::verify(&config).await;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report.to_json())?);
            } else {
                print!("{}", report.to_text());
            }
            Ok(if report.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Some(("scrub", args)) => {
            let mut config = load_config(matches, args)?;
            if let Some(terms) = args.get_many::<String>("term") {
                config.scrub_terms = terms.cloned().collect();
            }
            let changed = commands::scrub(&config).await?;
            println!("Scrubbed {} fixture(s)", changed.len());
            for (id, removed) in changed {
                println!("  {id}: {removed} item(s) removed");
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(("catalog", _)) => {
            print!("{}", commands::catalog());
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = cli().get_matches();

    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    };
    telemetry::init(format);

    match run(&matches).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
