//! Command-line interface for OWF
//! Parses OpenWorkoutFormat files and prints them as a tree, as canonical OWF or as JSON.
//!
//! Usage:
//!   owf `<files>...`                          - Print each file as a tree
//!   owf `<files>...` --format owf            - Reformat to canonical OWF
//!   owf `<files>...` --json                  - Print the document as JSON
//!   owf `<files>...` --resolve --var FTP=260W - Evaluate expressions first
//!
//! Settings come from the embedded defaults, then `--config <file>`, then flags.

mod output;

use clap::{Arg, ArgAction, ArgMatches, Command};
use output::{render, CliError};
use owf_config::{Loader, OutputFormat, OwfConfig};
use owf_parser::owf::loader::DocumentLoader;
use owf_parser::{resolve, Variables};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();
    if let Err(err) = run(&matches) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn build_cli() -> Command {
    Command::new("owf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse and display OpenWorkoutFormat (.owf) files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .help("OWF files to parse")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("resolve")
                .long("resolve")
                .help("Resolve expressions against frontmatter and configured variables")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format")
                .value_parser(OutputFormat::NAMES),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Output the document as JSON (same as --format json)")
                .action(ArgAction::SetTrue)
                .conflicts_with("format"),
        )
        .arg(
            Arg::new("var")
                .long("var")
                .value_name("KEY=VALUE")
                .help("Set a variable for --resolve, overriding frontmatter (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("TOML configuration file layered over the defaults"),
        )
}

fn load_config(matches: &ArgMatches) -> Result<OwfConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("output.format", format.as_str())?;
    }
    if matches.get_flag("json") {
        loader = loader.set_override("output.format", OutputFormat::Json.as_str())?;
    }
    if matches.get_flag("resolve") {
        loader = loader.set_override("resolve.enabled", true)?;
    }
    Ok(loader.build()?)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Configured variables, then `--var` flags on top
fn collect_variables(config: &OwfConfig, matches: &ArgMatches) -> Result<Variables, CliError> {
    let mut variables: Variables = config.variables.clone().into_iter().collect();
    for pair in matches.get_many::<String>("var").into_iter().flatten() {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::InvalidVariable(pair.clone()));
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(CliError::InvalidVariable(pair.clone()));
        }
        variables.insert(key, value);
    }
    Ok(variables)
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let config = load_config(matches)?;
    init_logging(&config.logging.level);

    let variables = collect_variables(&config, matches)?;
    let files = matches.get_many::<String>("files").into_iter().flatten();

    for path in files {
        debug!(path = %path, format = %config.output.format, "processing file");
        let loader = DocumentLoader::from_path(path)?;
        let mut doc = loader
            .load()
            .map_err(|err| CliError::from_load(err, loader.source()))?;
        if config.resolve.enabled {
            doc = resolve(&doc, &variables)?;
        }
        print!("{}", render(&doc, &config.output)?);
    }
    Ok(())
}
