//! Structured fact extraction for JavaScript and TypeScript sources.
//!
//! ```no_run
//! use sieve_core::Extractor;
//!
//! let mut extractor = Extractor::new();
//! let output = extractor.extract("const url = 'https://example.com';")?;
//! assert_eq!(output.results.string_count(), 1);
//! # Ok::<(), sieve_core::ExtractError>(())
//! ```

pub mod complexity;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod options;
pub mod parser;
pub mod patterns;
pub mod semantic;
pub mod store;
pub mod visitor;

pub use complexity::ComplexityEstimator;
pub use context::{ContextResolver, ValueContext};
pub use error::{ErrorKind, ExtractError};
pub use extract::ExtractionResults;
pub use extractor::{ExtractionOutput, Extractor};
pub use options::{ExtractorOptions, OptionsUpdate};
pub use parser::{ParseError, ParseOptions, Plugin, SourceParser, SourceType, SwcParser};
pub use patterns::{PatternMatch, PatternMatches, PatternRegistry};
pub use store::{ExtractionRecord, Statistics};
