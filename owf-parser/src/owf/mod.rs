//! Main module for OWF library functionality

pub mod ast;
pub mod building;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod resolving;
pub mod testing;
