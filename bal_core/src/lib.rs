//! `bal_core` is the core library for the [bal](https://github.com/ifiokjr/bal) delimiter balance checker. It provides the scanner, the project walker, configuration loading, and the knowledge-base bundler behind the `bal` command line tool. The scanner reads source text one character at a time and reports the first unbalanced bracket, tracking comments and string literals so delimiters inside them never count.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source file
//!   -> normalize line endings (CRLF to LF)
//!   -> Scanner (single pass over a logos token stream, line/column tracked)
//!   -> Mode tracking (line comments, block comments, string literals)
//!   -> Delimiter stack (push openers, match closers against expectations)
//!   -> ScanOutcome (balanced, or the first fault with its position)
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: single-pass delimiter balance scanning over source text.
//! - [`project`]: directory walking and per-file checking, with gitignore and
//!   exclude pattern support.
//! - [`config`]: configuration loading from `bal.toml`.
//! - [`bundle`]: bundling markdown documents into an embeddable knowledge
//!   base.
//!
//! ## Key Types
//!
//! - [`ScanOutcome`]: the verdict for one piece of source text, either
//!   balanced or the first fault found.
//! - [`Point`]: a line/column position (lines start at 1, columns at 0).
//! - [`FileReport`]: a scanned file together with its outcome.
//! - [`CheckOptions`]: knobs for the directory walk (excludes, extensions,
//!   size limit, gitignore).
//! - [`BalConfig`]: configuration loaded from `bal.toml`.
//! - [`KnowledgeEntry`]: a markdown document captured into a bundle.
//!
//! ## Quick Start
//!
//! ```rust
//! use bal_core::scan;
//!
//! let outcome = scan("const add = (a, b) => { return [a, b]; };");
//! assert!(outcome.is_balanced());
//!
//! let fault = scan("const xs = [1, 2);");
//! assert_eq!(
//! 	fault.message().as_deref(),
//! 	Some("Mismatched ')' at line 1:17. Expected ']' (opened at 1:12)")
//! );
//! ```

pub use bundle::*;
pub use config::*;
pub use error::*;
pub use position::*;
pub use project::*;
pub use scanner::*;

pub mod bundle;
pub mod config;
mod error;
mod position;
pub mod project;
pub mod scanner;

#[cfg(test)]
mod __fixtures;
