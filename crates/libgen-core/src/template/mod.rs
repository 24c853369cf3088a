//! Structured code assembly.
//!
//! Every generated TypeScript file goes through [`TemplateBuilder`], so
//! header comments and import blocks are formatted the same way everywhere.
//! File bodies are plain strings supplied by the generators.

mod builder;
mod imports;

pub use builder::{FileHeader, TemplateBuilder};
pub use imports::{ImportGroup, ImportSpec};
