//! Output formats
//!
//!     - [serializer]: canonical OWF text, the inverse of parsing
//!     - [treeviz]: a one-line-per-node console view of a document

pub mod serializer;
pub mod treeviz;

pub use serializer::serialize;
pub use treeviz::to_treeviz_str;
