//! Immutable option catalog with id and long-name lookup.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CatalogError;
use crate::types::{OptionDescriptor, OptionId, TEXT_ARGUMENT};

/// The set of options one parse recognises.
///
/// Construction checks that ids and long names are unique, so every lookup
/// during a parse resolves to at most one descriptor. Descriptor order is
/// preserved.
///
/// # Examples
///
/// ```
/// use clargs_core::{ArityMode, Catalog, OptionDescriptor, OptionId};
///
/// let catalog = Catalog::new(vec![
///     OptionDescriptor::new(OptionId::Short('a'), Some("all"), ArityMode::Disallowed),
///     OptionDescriptor::new(OptionId::LongOnly(1000), Some("blee"), ArityMode::Disallowed),
/// ])
/// .unwrap();
///
/// assert_eq!(catalog.by_short('a').unwrap().long_name(), Some("all"));
/// assert_eq!(catalog.by_long_name("blee").unwrap().id(), OptionId::LongOnly(1000));
/// assert_eq!(catalog.describe(OptionId::Short('a')), "-a/--all");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    descriptors: Vec<OptionDescriptor>,
    #[serde(skip)]
    by_id: HashMap<OptionId, usize>,
    #[serde(skip)]
    by_long_name: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] or
    /// [`CatalogError::DuplicateLongName`] when two descriptors collide,
    /// [`CatalogError::ReservedId`] for an id whose code is
    /// [`TEXT_ARGUMENT`], and [`CatalogError::EmptyLongName`] for a long name
    /// of `""`.
    pub fn new(descriptors: Vec<OptionDescriptor>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(descriptors.len());
        let mut by_long_name = HashMap::with_capacity(descriptors.len());

        for (index, descriptor) in descriptors.iter().enumerate() {
            if descriptor.id().code() == TEXT_ARGUMENT {
                return Err(CatalogError::ReservedId(descriptor.display_name()));
            }
            if by_id.insert(descriptor.id(), index).is_some() {
                return Err(CatalogError::DuplicateId(descriptor.display_name()));
            }
            if let Some(name) = descriptor.long_name() {
                if name.is_empty() {
                    return Err(CatalogError::EmptyLongName(descriptor.display_name()));
                }
                if by_long_name.insert(name.to_string(), index).is_some() {
                    return Err(CatalogError::DuplicateLongName(name.to_string()));
                }
            }
        }

        Ok(Self {
            descriptors,
            by_id,
            by_long_name,
        })
    }

    /// Returns an empty catalog, which recognises no options at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Finds the descriptor with the given id.
    pub fn by_id(&self, id: OptionId) -> Option<&OptionDescriptor> {
        self.by_id
            .get(&id)
            .and_then(|index| self.descriptors.get(*index))
    }

    /// Finds the descriptor reachable as `-ch`.
    pub fn by_short(&self, ch: char) -> Option<&OptionDescriptor> {
        self.by_id(OptionId::Short(ch))
    }

    /// Finds the descriptor reachable as `--name`.
    pub fn by_long_name(&self, name: &str) -> Option<&OptionDescriptor> {
        self.by_long_name
            .get(name)
            .and_then(|index| self.descriptors.get(*index))
    }

    /// Describes an option in its dual `-x/--name` form.
    ///
    /// Ids without a descriptor are described as `<parameter>`.
    pub fn describe(&self, id: OptionId) -> String {
        self.by_id(id)
            .map_or_else(|| "<parameter>".to_string(), OptionDescriptor::display_name)
    }

    /// Iterates descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.descriptors.iter()
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog has no descriptors.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a OptionDescriptor;
    type IntoIter = std::slice::Iter<'a, OptionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

/// Collects the ids referenced by incompatible sets that have no descriptor.
///
/// Dangling references are legal (they can simply never conflict) but usually
/// point at a typo in a catalog definition.
pub fn dangling_references(catalog: &Catalog) -> Vec<(OptionId, OptionId)> {
    let known: HashSet<OptionId> = catalog.iter().map(OptionDescriptor::id).collect();
    catalog
        .iter()
        .flat_map(|descriptor| {
            descriptor
                .incompatible()
                .iter()
                .filter(|other| !known.contains(other))
                .map(move |other| (descriptor.id(), *other))
        })
        .collect()
}
