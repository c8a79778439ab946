//! Sample file finder and loader
//!
//! The sample root is `$WORKSPACE/specs/<version>/` (currently v1). Element samples live
//! under `elements/<kind>/`, whole documents under `documents/`.
//!
//! Sample files are prefixed by a number followed by a dash (`01-simple.owf`), and are
//! addressed by that number. Files without a number prefix (such as the targets of file
//! includes) are ignored. Two files resolving to the same number is an error in the
//! corpus.
//!
//!     Samples::endurance(1).parse()
//!     Samples::load(SampleKind::Blocks, 2).source()
//!     Samples::document(1).load()

use super::workspace_path;
use crate::owf::ast::Document;
use crate::owf::loader::DocumentLoader;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const SAMPLES_VERSION: &str = "v1";
const SAMPLES_ROOT: &str = "specs";

/// Element sample collections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Endurance,
    Strength,
    Blocks,
    Notes,
    Sessions,
    Includes,
}

impl SampleKind {
    pub fn dir_name(&self) -> &'static str {
        match self {
            SampleKind::Endurance => "endurance",
            SampleKind::Strength => "strength",
            SampleKind::Blocks => "blocks",
            SampleKind::Notes => "notes",
            SampleKind::Sessions => "sessions",
            SampleKind::Includes => "includes",
        }
    }
}

#[derive(Debug, Clone)]
pub enum SampleError {
    FileNotFound(String),
    IoError(String),
    DuplicateNumber(String),
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            SampleError::IoError(msg) => write!(f, "IO error: {}", msg),
            SampleError::DuplicateNumber(msg) => write!(f, "Duplicate number: {}", msg),
        }
    }
}

impl std::error::Error for SampleError {}

impl From<std::io::Error> for SampleError {
    fn from(err: std::io::Error) -> Self {
        SampleError::IoError(err.to_string())
    }
}

/// `specs/v1/<category>[/<subcategory>]`
pub fn get_sample_root(category: &str, subcategory: Option<&str>) -> PathBuf {
    let mut path = workspace_path(SAMPLES_ROOT);
    path.push(SAMPLES_VERSION);
    path.push(category);
    if let Some(subcategory) = subcategory {
        path.push(subcategory);
    }
    path
}

/// Map each number-prefixed `.owf` file in `dir` to its number
pub fn list_files_by_number(dir: &Path) -> Result<HashMap<usize, PathBuf>, SampleError> {
    let mut number_map: HashMap<usize, PathBuf> = HashMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.extension().map(|e| e == "owf").unwrap_or(false) {
            continue;
        }
        let Some(number) = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.split('-').next())
            .and_then(|prefix| prefix.parse::<usize>().ok())
        else {
            continue;
        };

        if let Some(existing) = number_map.get(&number) {
            return Err(SampleError::DuplicateNumber(format!(
                "{} and {} both use number {}",
                existing.display(),
                path.display(),
                number
            )));
        }
        number_map.insert(number, path);
    }

    Ok(number_map)
}

fn find_by_number(dir: &Path, number: usize) -> Result<PathBuf, SampleError> {
    list_files_by_number(dir)?
        .remove(&number)
        .ok_or_else(|| SampleError::FileNotFound(format!("#{} in {}", number, dir.display())))
}

/// Fluent handle on one sample file
pub struct SampleLoader {
    path: PathBuf,
}

impl SampleLoader {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", self.path.display(), e))
    }

    /// Parse without resolving includes
    pub fn parse(&self) -> Document {
        self.loader()
            .parse()
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", self.path.display(), e))
    }

    /// Parse and resolve includes relative to the sample's directory
    pub fn load(&self) -> Document {
        self.loader()
            .load()
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", self.path.display(), e))
    }

    fn loader(&self) -> DocumentLoader {
        DocumentLoader::from_path(&self.path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", self.path.display(), e))
    }
}

macro_rules! element_shortcuts {
    ($($name:ident => $variant:ident);* $(;)?) => {
        $(
            #[doc = concat!("Load a `", stringify!($name), "` element sample")]
            pub fn $name(number: usize) -> SampleLoader {
                Self::load(SampleKind::$variant, number)
            }
        )*
    };
}

/// Interface for loading test samples
pub struct Samples;

impl Samples {
    pub fn find_file(kind: SampleKind, number: usize) -> Result<PathBuf, SampleError> {
        find_by_number(&get_sample_root("elements", Some(kind.dir_name())), number)
    }

    pub fn find_document_file(number: usize) -> Result<PathBuf, SampleError> {
        find_by_number(&get_sample_root("documents", None), number)
    }

    pub fn load(kind: SampleKind, number: usize) -> SampleLoader {
        let path = Self::find_file(kind, number)
            .unwrap_or_else(|e| panic!("Failed to find {:?} #{}: {}", kind, number, e));
        SampleLoader { path }
    }

    pub fn document(number: usize) -> SampleLoader {
        let path = Self::find_document_file(number)
            .unwrap_or_else(|e| panic!("Failed to find document #{}: {}", number, e));
        SampleLoader { path }
    }

    /// Every numbered document sample, in number order
    pub fn all_documents() -> Vec<SampleLoader> {
        let root = get_sample_root("documents", None);
        let mut files: Vec<(usize, PathBuf)> = list_files_by_number(&root)
            .unwrap_or_else(|e| panic!("Failed to list {}: {}", root.display(), e))
            .into_iter()
            .collect();
        files.sort();
        files
            .into_iter()
            .map(|(_, path)| SampleLoader { path })
            .collect()
    }

    element_shortcuts! {
        endurance => Endurance;
        strength => Strength;
        blocks => Blocks;
        notes => Notes;
        sessions => Sessions;
        includes => Includes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_root() {
        let root = get_sample_root("elements", Some("blocks"));
        assert!(root.ends_with("specs/v1/elements/blocks"));
        assert!(root.is_dir());
    }

    #[test]
    fn unnumbered_files_are_skipped() {
        let files = list_files_by_number(&get_sample_root("elements", Some("includes"))).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.values().all(|p| !p.ends_with("mobility-flow.owf")));
    }

    #[test]
    fn test_missing_number() {
        let err = Samples::find_file(SampleKind::Endurance, 99).unwrap_err();
        assert!(matches!(err, SampleError::FileNotFound(_)));
    }

    #[test]
    fn test_fluent_loading() {
        let sample = Samples::endurance(1);
        assert!(sample.source().starts_with("# Easy Run"));
        assert_eq!(sample.parse().workouts.len(), 1);
        assert!(!Samples::all_documents().is_empty());
    }
}
