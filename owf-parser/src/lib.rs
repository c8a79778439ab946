//! # owf-parser
//!
//! Parser, resolver and serializer for the OpenWorkoutFormat (OWF).
//!
//! OWF is a plain-text, indentation-structured language for describing workouts:
//! endurance sessions, strength sets and timed blocks (EMOM, AMRAP, for-time),
//! with computed intensity parameters such as `@80% of FTP`.
//!
//! File Layout
//!
//!     src/owf
//!       ├── lexing      Frontmatter extraction and line classification
//!       ├── building    Indentation tree construction and note attachment
//!       ├── parsing     Expression, parameter, step, heading and document grammar
//!       ├── resolving   Expression evaluation against a variable environment
//!       ├── formats     Canonical OWF serializer and console tree view
//!       ├── loader      File loading and include resolution
//!       └── ast         The document data model
//!
//!     Data flows strictly downward: each stage consumes an immutable tree and
//!     produces a new one.
//!
//! For testing guidelines, see the [testing module](owf::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod owf;

pub use owf::ast::{Document, ParseError, ResolveError, Variables};
pub use owf::formats::serialize;
pub use owf::parsing::parse_document as parse;
pub use owf::resolving::resolve;
