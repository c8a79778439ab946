//! Building
//!
//!     The building stage turns the flat list of classified lines of one workout section
//!     into a tree of raw blocks. A raw block is a step line plus its indented children
//!     and the notes that trail it; its content is still unparsed text. The step parser
//!     gives each raw block its meaning.
//!
//!     See [block_builder](block_builder) for the indentation and note attachment rules.

pub mod block_builder;

pub use block_builder::{build_blocks, BlockTree, RawBlock};
