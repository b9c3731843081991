//! Supported languages.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for the supported languages and their metadata
//! - `code`: Type-safe `LanguageCode` validated against the registry
//!
//! # Example
//!
//! ```rust
//! use language_confusion::language::{LanguageCode, LanguageRegistry, ScriptFamily};
//!
//! let japanese = LanguageCode::from_code("ja").unwrap();
//! assert_eq!(japanese.script_family(), ScriptFamily::Cjk);
//! assert_eq!(LanguageRegistry::get().list_all().len(), 9);
//! ```

mod code;
mod registry;

pub use code::{LanguageCode, ScriptFamily};
pub use registry::{LanguageConfig, LanguageRegistry};
