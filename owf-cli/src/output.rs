//! Rendering documents for the terminal, and the CLI's error type

use owf_config::{OutputConfig, OutputFormat};
use owf_parser::owf::formats::to_treeviz_str;
use owf_parser::owf::loader::LoaderError;
use owf_parser::owf::ast::format_source_context;
use owf_parser::{serialize, Document, ParseError, ResolveError};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Config(owf_config::ConfigError),
    Load(LoaderError),
    /// A parse error in the named file, with the surrounding source lines
    Parse {
        error: ParseError,
        context: String,
    },
    Resolve(ResolveError),
    Json(serde_json::Error),
    InvalidVariable(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(err) => write!(f, "Invalid configuration: {}", err),
            CliError::Load(err) => write!(f, "{}", err),
            CliError::Parse { error, context } => {
                write!(f, "{}\n{}", error, context.trim_end())
            }
            CliError::Resolve(err) => write!(f, "{}", err),
            CliError::Json(err) => write!(f, "Cannot encode JSON: {}", err),
            CliError::InvalidVariable(pair) => {
                write!(f, "Invalid --var '{}': expected KEY=VALUE", pair)
            }
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Attach source context to parse errors of the file that was read
    pub fn from_load(err: LoaderError, source: &str) -> Self {
        match err {
            LoaderError::Parse(error) => match error.position {
                Some(position) => CliError::Parse {
                    context: format_source_context(source, position.line),
                    error,
                },
                None => CliError::Load(LoaderError::Parse(error)),
            },
            other => CliError::Load(other),
        }
    }
}

impl From<owf_config::ConfigError> for CliError {
    fn from(err: owf_config::ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<LoaderError> for CliError {
    fn from(err: LoaderError) -> Self {
        CliError::Load(err)
    }
}

impl From<ResolveError> for CliError {
    fn from(err: ResolveError) -> Self {
        CliError::Resolve(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

/// Render a document in the configured format, newline-terminated
pub fn render(doc: &Document, output: &OutputConfig) -> Result<String, CliError> {
    Ok(match output.format {
        OutputFormat::Text => to_treeviz_str(doc),
        OutputFormat::Owf => serialize(doc),
        OutputFormat::Json if output.pretty_json => {
            format!("{}\n", serde_json::to_string_pretty(doc)?)
        }
        OutputFormat::Json => format!("{}\n", serde_json::to_string(doc)?),
    })
}
