//! `pharma-console` binary entry point

use clap::{value_parser, Arg, ArgAction, Command};
use pharma_console::{init_tracing, run_check, run_diff, ConsoleConfig};
use pharma_lookup::LookupKind;
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Command::new("pharma-console")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Existence checks and partial-update diffs for the distribution console")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("check")
                .about("Check that a salesperson or product exists")
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .required(true)
                        .value_parser(value_parser!(LookupKind))
                        .help("salesperson | product"),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("Override the lookup service root"),
                )
                .arg(Arg::new("id").required(true).help("Identifier or SKU")),
        )
        .subcommand(
            Command::new("diff")
                .about("Print the fields of CURRENT that differ from BASELINE")
                .arg(
                    Arg::new("baseline")
                        .long("baseline")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON snapshot loaded for editing; omit when creating"),
                )
                .arg(
                    Arg::new("current")
                        .long("current")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON form state"),
                ),
        );

    let matches = cli.get_matches();
    init_tracing("info", matches.get_flag("log-json"));

    let config = ConsoleConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("check", sub)) => {
            let kind = *sub
                .get_one::<LookupKind>("kind")
                .ok_or_else(|| anyhow::anyhow!("--kind is required"))?;
            let id = sub
                .get_one::<String>("id")
                .ok_or_else(|| anyhow::anyhow!("identifier is required"))?;
            let config = match sub.get_one::<String>("base-url") {
                Some(url) => config.with_base_url(url.clone()),
                None => config,
            };

            let outcome = run_check(&config, kind, id).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            if !outcome.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(("diff", sub)) => {
            let current = sub
                .get_one::<PathBuf>("current")
                .ok_or_else(|| anyhow::anyhow!("--current is required"))?;
            let baseline = sub.get_one::<PathBuf>("baseline").map(PathBuf::as_path);

            let changes = run_diff(baseline, current)?;
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
        _ => unreachable!("subcommand_required"),
    }

    Ok(ExitCode::SUCCESS)
}
