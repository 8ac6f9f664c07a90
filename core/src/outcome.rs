//! Parse results and their lookup indices.

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::error::ParseError;
use crate::types::{Occurrence, OptionId};

/// Result of one parse.
///
/// A successful outcome carries every occurrence in command-line order plus
/// lookup indices by id and by long name; when an option repeats, the lookups
/// return its last occurrence. A failed outcome carries the error and the
/// occurrences committed before the failure, and its lookups are empty.
#[derive(Debug, Clone, Default)]
pub struct ParseOutcome {
    occurrences: Vec<Occurrence>,
    unparsed: Vec<String>,
    error: Option<ParseError>,
    by_id: HashMap<Option<OptionId>, usize>,
    by_long_name: HashMap<String, usize>,
}

impl ParseOutcome {
    pub(crate) fn succeeded(
        catalog: &Catalog,
        occurrences: Vec<Occurrence>,
        unparsed: Vec<String>,
    ) -> Self {
        let (by_id, by_long_name) = build_index(catalog, &occurrences);
        Self {
            occurrences,
            unparsed,
            error: None,
            by_id,
            by_long_name,
        }
    }

    pub(crate) fn failed(occurrences: Vec<Occurrence>, error: ParseError) -> Self {
        Self {
            occurrences,
            error: Some(error),
            ..Default::default()
        }
    }

    /// Whether the parse succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Returns the parse error, if any.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Returns the error as a human-readable message.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Returns the occurrences in command-line order.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    /// Returns the arguments left unparsed by a halted parse.
    ///
    /// Empty unless a halt predicate stopped the parse early. The list can be
    /// handed to a fresh parse as is.
    pub fn unparsed(&self) -> &[String] {
        &self.unparsed
    }

    /// Whether a halt predicate stopped the parse before the end.
    pub fn was_halted(&self) -> bool {
        !self.unparsed.is_empty()
    }

    /// Returns the last occurrence of the option with `id`.
    pub fn get_by_id(&self, id: OptionId) -> Option<&Occurrence> {
        self.lookup(self.by_id.get(&Some(id)))
    }

    /// Returns the last occurrence of the option named `--name`.
    pub fn get_by_name(&self, name: &str) -> Option<&Occurrence> {
        self.lookup(self.by_long_name.get(name))
    }

    /// Returns the last piece of positional text.
    pub fn last_text(&self) -> Option<&Occurrence> {
        self.lookup(self.by_id.get(&None))
    }

    /// Iterates positional text values in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.occurrences
            .iter()
            .filter(|occurrence| occurrence.is_text())
            .filter_map(Occurrence::argument)
    }

    /// Converts into the occurrence list, or the error.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of a failed parse.
    pub fn into_result(self) -> Result<Vec<Occurrence>, ParseError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.occurrences),
        }
    }

    fn lookup(&self, index: Option<&usize>) -> Option<&Occurrence> {
        index.and_then(|index| self.occurrences.get(*index))
    }
}

fn build_index(
    catalog: &Catalog,
    occurrences: &[Occurrence],
) -> (HashMap<Option<OptionId>, usize>, HashMap<String, usize>) {
    let mut by_id = HashMap::with_capacity(occurrences.len());
    let mut by_long_name = HashMap::with_capacity(occurrences.len());

    for (index, occurrence) in occurrences.iter().enumerate() {
        by_id.insert(occurrence.id, index);
        let long_name = occurrence
            .id
            .and_then(|id| catalog.by_id(id))
            .and_then(|descriptor| descriptor.long_name());
        if let Some(name) = long_name {
            by_long_name.insert(name.to_string(), index);
        }
    }

    (by_id, by_long_name)
}
