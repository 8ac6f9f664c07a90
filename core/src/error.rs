//! Error types for catalog construction and argument parsing.
//!
//! [`CatalogError`] reports contract violations in the option catalog. These
//! are programming errors in the caller and surface before any parse begins.
//! [`ParseError`] reports problems with the supplied arguments; its `Display`
//! impl is the single human-readable message handed back to users.

use thiserror::Error;

/// Invalid option catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A descriptor declares no arity mode.
    #[error("no mode specified for option {0}")]
    NoArityMode(String),
    /// A descriptor declares more than one arity mode.
    #[error("multiple modes specified for option {0}")]
    MultipleArityModes(String),
    /// A descriptor's id has the code reserved for positional text.
    #[error("option {0} uses the id reserved for positional text")]
    ReservedId(String),
    /// Two descriptors share an id.
    #[error("duplicate option id in catalog: {0}")]
    DuplicateId(String),
    /// Two descriptors share a long name.
    #[error("duplicate long option in catalog: --{0}")]
    DuplicateLongName(String),
    /// A long name is empty, which `--` could never reach.
    #[error("empty long option name for {0}")]
    EmptyLongName(String),
}

/// Failure while parsing an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A lone `-` with nothing after it.
    #[error("Malformed option -")]
    MalformedOption,
    /// No descriptor matches the option as typed.
    #[error("Unknown option {0}")]
    UnknownOption(String),
    /// A required argument never arrived.
    #[error("Missing argument to option {0}")]
    MissingArgument(String),
    /// A two-argument option's first slot was empty.
    #[error("Unable to parse first argument for option {0}")]
    FirstArgumentUnparseable(String),
    /// An option that may not repeat appeared twice.
    #[error("Duplicate options for {0} found.")]
    DuplicateOption(String),
    /// Two mutually exclusive options were both supplied.
    #[error("Incompatible options {0} and {1} found.")]
    IncompatibleOptions(String, String),
    /// The engine reached a state it should never be in.
    #[error("Illegal parser state: {0}")]
    InternalInconsistency(String),
}
