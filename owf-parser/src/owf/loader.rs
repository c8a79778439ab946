//! Document loading utilities
//!
//! This module provides `DocumentLoader`, which reads OWF source from a file or a string,
//! parses it and splices included workouts into place.
//!
//! Includes
//!
//!     `- include: Name` is looked up among the named workouts of the same document first.
//!     Failing that, the loader reads `<dir>/<name>.owf` next to the including file, where
//!     the name is lower-cased with spaces turned into hyphens (`Morning Warmup` becomes
//!     `morning-warmup.owf`). From the loaded file it takes the workout with the same
//!     name, or its only workout.
//!
//!     Included files resolve their own includes relative to their own directory. A file
//!     that is already being loaded further up the chain is a circular include.
//!
//! Example
//!
//!     let doc = DocumentLoader::from_path("week.owf")?.load()?;
//!     let doc = load("week.owf")?;

use crate::owf::ast::{Document, ParseError, SourceSpan, Step, Workout};
use crate::owf::parsing::parse_document;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Error that can occur when loading documents
#[derive(Debug, Clone, PartialEq)]
pub enum LoaderError {
    /// IO error when reading a file
    Io(String),
    /// The source is not valid OWF
    Parse(ParseError),
    /// An include could not be resolved
    Include {
        message: String,
        position: Option<SourceSpan>,
    },
}

impl LoaderError {
    fn include(message: impl Into<String>, position: SourceSpan) -> Self {
        LoaderError::Include {
            message: message.into(),
            position: Some(position),
        }
    }
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io(msg) => write!(f, "IO error: {}", msg),
            LoaderError::Parse(err) => write!(f, "{}", err),
            LoaderError::Include {
                message,
                position: Some(position),
            } => write!(f, "{}: {}", position, message),
            LoaderError::Include { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::Io(err.to_string())
    }
}

impl From<ParseError> for LoaderError {
    fn from(err: ParseError) -> Self {
        LoaderError::Parse(err)
    }
}

/// Load, parse and resolve includes for the file at `path`
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document, LoaderError> {
    DocumentLoader::from_path(path)?.load()
}

/// The file name an included workout is looked up under
pub fn include_file_name(workout_name: &str) -> String {
    format!("{}.owf", workout_name.to_lowercase().replace(' ', "-"))
}

/// Document loader
///
/// Sources loaded from a string resolve file includes against the current directory.
pub struct DocumentLoader {
    source: String,
    path: Option<PathBuf>,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading workout file");
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader {
            source,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
            path: None,
        }
    }

    /// Parse the source, leaving includes unresolved
    pub fn parse(&self) -> Result<Document, LoaderError> {
        Ok(parse_document(&self.source)?)
    }

    /// Parse the source and resolve every include
    pub fn load(&self) -> Result<Document, LoaderError> {
        let doc = self.parse()?;
        let mut chain = Vec::new();
        if let Some(path) = &self.path {
            chain.push(fs::canonicalize(path)?);
        }
        let resolver = IncludeResolver {
            base_dir: self.base_dir(),
            chain: &chain,
        };
        resolver.resolve_document(&doc)
    }

    fn base_dir(&self) -> PathBuf {
        self.path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

struct IncludeResolver<'a> {
    base_dir: PathBuf,
    /// Canonical paths of the files currently being loaded, outermost first
    chain: &'a [PathBuf],
}

impl IncludeResolver<'_> {
    fn resolve_document(&self, doc: &Document) -> Result<Document, LoaderError> {
        let named: HashMap<&str, &Workout> = doc
            .workouts
            .iter()
            .filter(|w| !w.name.is_empty())
            .map(|w| (w.name.as_str(), w))
            .collect();

        let workouts = doc
            .workouts
            .iter()
            .map(|workout| self.resolve_workout(workout, &named))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(doc.with_workouts(workouts))
    }

    fn resolve_workout(
        &self,
        workout: &Workout,
        named: &HashMap<&str, &Workout>,
    ) -> Result<Workout, LoaderError> {
        Ok(workout.with_steps(self.resolve_steps(&workout.steps, named)?))
    }

    fn resolve_steps(
        &self,
        steps: &[Step],
        named: &HashMap<&str, &Workout>,
    ) -> Result<Vec<Step>, LoaderError> {
        steps
            .iter()
            .map(|step| self.resolve_step(step, named))
            .collect()
    }

    fn resolve_step(
        &self,
        step: &Step,
        named: &HashMap<&str, &Workout>,
    ) -> Result<Step, LoaderError> {
        match step {
            Step::Include(include) => {
                let name = include.workout_name.as_str();
                if let Some(workout) = named.get(name) {
                    debug!(workout = name, "resolved include within the document");
                    return Ok(Step::Include(include.with_resolved((*workout).clone())));
                }
                let workout = self.load_included(name, include.span)?;
                Ok(Step::Include(include.with_resolved(workout)))
            }
            Step::Block(block) => Ok(Step::Block(
                block.with_steps(self.resolve_steps(&block.steps, named)?),
            )),
            Step::Workout(workout) => Ok(Step::Workout(self.resolve_workout(workout, named)?)),
            _ => Ok(step.clone()),
        }
    }

    fn load_included(&self, name: &str, span: SourceSpan) -> Result<Workout, LoaderError> {
        let path = self.base_dir.join(include_file_name(name));
        if !path.is_file() {
            return Err(LoaderError::include(
                format!(
                    "Cannot resolve include: '{}' (not found in document or as {})",
                    name,
                    path.display()
                ),
                span,
            ));
        }

        let canonical = fs::canonicalize(&path)?;
        if self.chain.contains(&canonical) {
            return Err(LoaderError::include(
                format!("Circular include detected: '{}'", name),
                span,
            ));
        }

        debug!(workout = name, path = %path.display(), "loading included file");
        let loader = DocumentLoader::from_path(&path)?;
        let mut chain = self.chain.to_vec();
        chain.push(canonical);
        let doc = IncludeResolver {
            base_dir: loader.base_dir(),
            chain: &chain,
        }
        .resolve_document(&loader.parse().map_err(|err| match err {
            LoaderError::Parse(err) => {
                LoaderError::include(format!("In {}: {}", path.display(), err), span)
            }
            other => other,
        })?)?;

        let found = match doc.workout(name) {
            Some(workout) => Some(workout),
            None if doc.workouts.len() == 1 => doc.workouts.first(),
            None => None,
        };
        found.cloned().ok_or_else(|| {
            LoaderError::include(
                format!("Cannot find workout '{}' in {}", name, path.display()),
                span,
            )
        })
    }
}
