//! GNU-style command line argument tokenizer and validator.
//!
//! This crate turns a flat list of process arguments into a list of
//! recognised options and positional text, following the usual GNU
//! conventions:
//!
//! - [`Catalog`]: the immutable set of [`OptionDescriptor`]s one parse
//!   recognises, looked up by [`OptionId`] and by long name.
//! - [`ArgsParser`]: the parsing engine: short options (`-x`, `-xvalue`,
//!   `-x value`, `-x=value`), long options (`--name`, `--name=value`,
//!   `--name value`), bundles (`-abc`), and the `--` terminator.
//! - [`ParseOutcome`]: the ordered [`Occurrence`]s, lookups by id and long
//!   name, the error if any, and the unparsed remainder of a halted parse.
//!
//! After a complete parse every option is checked against the incompatible
//! sets of the others ([`check_incompatibilities`]); by default an option is
//! incompatible with itself, so repeating it is an error.
//!
//! # Example
//!
//! ```
//! use clargs_core::*;
//!
//! let catalog = Catalog::new(vec![
//!     OptionDescriptor::new(OptionId::Short('v'), Some("verbose"), ArityMode::Disallowed)
//!         .incompatible_with([OptionId::Short('q')]),
//!     OptionDescriptor::new(OptionId::Short('q'), Some("quiet"), ArityMode::Disallowed)
//!         .incompatible_with([OptionId::Short('v')]),
//!     OptionDescriptor::new(OptionId::Short('o'), Some("output"), ArityMode::Required),
//! ])
//! .unwrap();
//!
//! let outcome = parse_args(&catalog, &["-vo", "out.txt", "input.txt"]);
//! assert!(outcome.is_success());
//! assert_eq!(outcome.get_by_name("output").unwrap().argument(), Some("out.txt"));
//! assert_eq!(outcome.texts().collect::<Vec<_>>(), vec!["input.txt"]);
//!
//! let outcome = parse_args(&catalog, &["--verbose", "--quiet"]);
//! assert_eq!(
//!     outcome.error_message().as_deref(),
//!     Some("Incompatible options -q/--quiet and -v/--verbose found.")
//! );
//! ```

mod catalog;
mod compat;
mod cursor;
mod error;
mod outcome;
mod parser;
mod types;

pub use catalog::{Catalog, dangling_references};
pub use compat::check_incompatibilities;
pub use error::{CatalogError, ParseError};
pub use outcome::ParseOutcome;
pub use parser::{ArgsParser, parse_args};
pub use types::*;
