//! arbify: move string literals out of Dart source and into ARB resource files.
//!
//! The [`core`] module holds the extraction engine and knows nothing about
//! the command line; [`cli`] wires it to files on disk.
//!
//! ```
//! use arbify::core::{Cursor, Extractor, SourceBuffer};
//!
//! let text = "Text('Welcome Home')";
//! let cursor = Cursor::Caret(8);
//! let (literal, key) = Extractor::prepare(&SourceBuffer::new(text, &cursor)).unwrap();
//! assert_eq!(literal.content, "Welcome Home");
//! assert_eq!(key.as_str(), "welcome_home");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod logging;
pub mod utils;
