//! Option catalog and parse occurrence types.
//!
//! This module defines the data model shared by the catalog, the parsing
//! engine, and callers: identifiers, arity modes, descriptors, and the
//! occurrences a parse produces. The types derive [`serde`] traits so that
//! catalogs can be loaded from configuration files and parse results can be
//! emitted as JSON or YAML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Numeric code reported for positional text.
///
/// No [`OptionId`] ever has this code, so it is safe to use as a "no option"
/// marker when ids are flattened to integers.
pub const TEXT_ARGUMENT: u32 = 0;

/// Identifier of an option descriptor.
///
/// Options reachable through a single-letter form are identified by that
/// character. Options that only have a long form carry an arbitrary positive
/// number instead.
///
/// # Examples
///
/// ```
/// use clargs_core::OptionId;
///
/// let verbose = OptionId::Short('v');
/// assert_eq!(verbose.code(), 'v' as u32);
/// assert_eq!(verbose.short(), Some('v'));
///
/// let color = OptionId::LongOnly(1000);
/// assert_eq!(color.short(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionId {
    /// Option with a single-letter form (`-x`).
    Short(char),
    /// Option without a single-letter form; only reachable through `--name`.
    LongOnly(u32),
}

impl OptionId {
    /// Returns the numeric code of this id.
    pub fn code(self) -> u32 {
        match self {
            Self::Short(ch) => u32::from(ch),
            Self::LongOnly(code) => code,
        }
    }

    /// Returns the single-letter form, if any.
    pub fn short(self) -> Option<char> {
        match self {
            Self::Short(ch) => Some(ch),
            Self::LongOnly(_) => None,
        }
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short(ch) => write!(f, "-{ch}"),
            Self::LongOnly(code) => write!(f, "#{code}"),
        }
    }
}

/// How many argument values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityMode {
    /// No argument (`-v`, `--verbose`).
    Disallowed,
    /// Zero or one argument (`-T`, `-T3`, `--taint=3`).
    Optional,
    /// Exactly one argument (`-f file`, `--file=file`).
    Required,
    /// A `key=value` pair (`-Dname=value`).
    RequiresTwo,
}

impl ArityMode {
    /// Resolves the arity mode from classic option flags.
    ///
    /// Exactly one of the four argument flags must be present; on failure the
    /// number of argument flags found is returned.
    /// [`OptionFlag::DuplicatesAllowed`] is ignored here.
    fn from_flags(flags: &[OptionFlag]) -> Result<Self, usize> {
        let modes: Vec<ArityMode> = flags.iter().filter_map(|flag| flag.arity_mode()).collect();
        match modes.as_slice() {
            [mode] => Ok(*mode),
            other => Err(other.len()),
        }
    }
}

/// Classic option flag words, as used by catalog files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionFlag {
    /// One argument is required.
    ArgumentRequired,
    /// The argument is optional.
    ArgumentOptional,
    /// The option takes no argument.
    ArgumentDisallowed,
    /// Two arguments (`key=value`) are required.
    #[serde(alias = "arguments_required_two")]
    ArgumentsRequired2,
    /// The option may appear more than once.
    DuplicatesAllowed,
}

impl OptionFlag {
    fn arity_mode(self) -> Option<ArityMode> {
        match self {
            Self::ArgumentRequired => Some(ArityMode::Required),
            Self::ArgumentOptional => Some(ArityMode::Optional),
            Self::ArgumentDisallowed => Some(ArityMode::Disallowed),
            Self::ArgumentsRequired2 => Some(ArityMode::RequiresTwo),
            Self::DuplicatesAllowed => None,
        }
    }
}

/// Declaration of one recognised option.
///
/// Descriptors are immutable once placed in a [`Catalog`](crate::Catalog).
/// By default an option is incompatible with itself, so supplying it twice is
/// a duplicate-option error. [`allow_duplicates`](Self::allow_duplicates)
/// clears that, and [`incompatible_with`](Self::incompatible_with) replaces the
/// whole set.
///
/// # Examples
///
/// ```
/// use clargs_core::{ArityMode, OptionDescriptor, OptionId};
///
/// let file = OptionDescriptor::new(OptionId::Short('f'), Some("file"), ArityMode::Required)
///     .with_description("the build file");
/// assert_eq!(file.long_name(), Some("file"));
/// assert!(file.is_incompatible_with(OptionId::Short('f')));
///
/// let define = OptionDescriptor::new(OptionId::Short('D'), Some("define"), ArityMode::RequiresTwo)
///     .allow_duplicates();
/// assert!(define.incompatible().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    id: OptionId,
    long_name: Option<String>,
    arity: ArityMode,
    description: Option<String>,
    incompatible: Vec<OptionId>,
}

impl OptionDescriptor {
    /// Creates a descriptor that may not be repeated.
    pub fn new(id: OptionId, long_name: Option<&str>, arity: ArityMode) -> Self {
        Self {
            id,
            long_name: long_name.map(String::from),
            arity,
            description: None,
            incompatible: vec![id],
        }
    }

    /// Creates a descriptor from classic flag words.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoArityMode`] when no argument flag is given and
    /// [`CatalogError::MultipleArityModes`] when more than one is.
    ///
    /// # Examples
    ///
    /// ```
    /// use clargs_core::{ArityMode, OptionDescriptor, OptionFlag, OptionId};
    ///
    /// let define = OptionDescriptor::from_flags(
    ///     OptionId::Short('D'),
    ///     Some("define"),
    ///     &[OptionFlag::ArgumentsRequired2, OptionFlag::DuplicatesAllowed],
    /// )
    /// .unwrap();
    /// assert_eq!(define.arity(), ArityMode::RequiresTwo);
    /// assert!(!define.is_incompatible_with(OptionId::Short('D')));
    /// ```
    pub fn from_flags(
        id: OptionId,
        long_name: Option<&str>,
        flags: &[OptionFlag],
    ) -> Result<Self, CatalogError> {
        let arity = ArityMode::from_flags(flags).map_err(|found| {
            let option = dual_form(id, long_name);
            if found == 0 {
                CatalogError::NoArityMode(option)
            } else {
                CatalogError::MultipleArityModes(option)
            }
        })?;
        let descriptor = Self::new(id, long_name, arity);
        if flags.contains(&OptionFlag::DuplicatesAllowed) {
            Ok(descriptor.allow_duplicates())
        } else {
            Ok(descriptor)
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Allows the option to appear more than once.
    pub fn allow_duplicates(mut self) -> Self {
        let id = self.id;
        self.incompatible.retain(|other| *other != id);
        self
    }

    /// Replaces the incompatible set.
    ///
    /// The option's own id is not added implicitly; include it to keep
    /// rejecting duplicates.
    pub fn incompatible_with(mut self, ids: impl IntoIterator<Item = OptionId>) -> Self {
        self.incompatible = ids.into_iter().collect();
        self
    }

    /// Returns the identifier.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// Returns the long form without its leading `--`.
    pub fn long_name(&self) -> Option<&str> {
        self.long_name.as_deref()
    }

    /// Returns the arity mode.
    pub fn arity(&self) -> ArityMode {
        self.arity
    }

    /// Returns the description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the ids this option conflicts with.
    pub fn incompatible(&self) -> &[OptionId] {
        &self.incompatible
    }

    /// Whether this option conflicts with `other`.
    pub fn is_incompatible_with(&self, other: OptionId) -> bool {
        self.incompatible.contains(&other)
    }

    /// Returns the `-x/--name` form used in diagnostics.
    pub fn display_name(&self) -> String {
        dual_form(self.id, self.long_name.as_deref())
    }
}

pub(crate) fn dual_form(id: OptionId, long_name: Option<&str>) -> String {
    match (id.short(), long_name) {
        (Some(ch), Some(name)) => format!("-{ch}/--{name}"),
        (Some(ch), None) => format!("-{ch}"),
        (None, Some(name)) => format!("--{name}"),
        (None, None) => id.to_string(),
    }
}

/// One recognised option, or one piece of positional text.
///
/// Text occurrences have no id and hold the original token as their single
/// argument.
///
/// # Examples
///
/// ```
/// use clargs_core::{Occurrence, OptionId, TEXT_ARGUMENT};
///
/// let text = Occurrence::text("kid");
/// assert!(text.is_text());
/// assert_eq!(text.code(), TEXT_ARGUMENT);
/// assert_eq!(text.argument(), Some("kid"));
///
/// let all = Occurrence::option(OptionId::Short('a'));
/// assert_eq!(all.argument_count(), 0);
/// assert_eq!(all.argument(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// Matching descriptor id, `None` for positional text.
    pub id: Option<OptionId>,
    /// Captured arguments in order.
    pub arguments: Vec<String>,
}

impl Occurrence {
    /// Creates an occurrence of an option with no arguments yet.
    pub fn option(id: OptionId) -> Self {
        Self {
            id: Some(id),
            arguments: Vec::new(),
        }
    }

    /// Creates a positional text occurrence.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            id: None,
            arguments: vec![value.into()],
        }
    }

    /// Whether this is positional text.
    pub fn is_text(&self) -> bool {
        self.id.is_none()
    }

    /// Returns the numeric id, [`TEXT_ARGUMENT`] for text.
    pub fn code(&self) -> u32 {
        self.id.map_or(TEXT_ARGUMENT, OptionId::code)
    }

    /// Returns the first argument.
    pub fn argument(&self) -> Option<&str> {
        self.argument_at(0)
    }

    /// Returns the argument at `index`.
    pub fn argument_at(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    /// Returns the number of captured arguments.
    pub fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    pub(crate) fn push_argument(&mut self, value: String) {
        self.arguments.push(value);
    }
}
