//! Post-parse duplicate and incompatibility checks.

use crate::catalog::Catalog;
use crate::error::ParseError;
use crate::types::Occurrence;

/// Checks every committed option against every other one.
///
/// An option conflicts with another when its descriptor lists the other's id
/// as incompatible. Text occurrences and ids without a descriptor never
/// conflict. Quadratic in the number of occurrences, which is bounded by the
/// size of a command line.
///
/// # Errors
///
/// Returns [`ParseError::DuplicateOption`] when an option conflicts with a
/// second occurrence of itself, and [`ParseError::IncompatibleOptions`] when
/// two different options conflict.
///
/// # Examples
///
/// ```
/// use clargs_core::{
///     ArityMode, Catalog, Occurrence, OptionDescriptor, OptionId, ParseError,
///     check_incompatibilities,
/// };
///
/// let catalog = Catalog::new(vec![
///     OptionDescriptor::new(OptionId::Short('q'), Some("quiet"), ArityMode::Disallowed),
/// ])
/// .unwrap();
///
/// let twice = vec![
///     Occurrence::option(OptionId::Short('q')),
///     Occurrence::option(OptionId::Short('q')),
/// ];
/// assert_eq!(
///     check_incompatibilities(&catalog, &twice),
///     Err(ParseError::DuplicateOption("-q/--quiet".into()))
/// );
/// ```
pub fn check_incompatibilities(
    catalog: &Catalog,
    occurrences: &[Occurrence],
) -> Result<(), ParseError> {
    for (index, occurrence) in occurrences.iter().enumerate() {
        let Some(id) = occurrence.id else {
            continue;
        };
        let Some(descriptor) = catalog.by_id(id) else {
            continue;
        };

        for (other_index, other) in occurrences.iter().enumerate() {
            if other_index == index {
                continue;
            }
            let Some(other_id) = other.id else {
                continue;
            };
            if !descriptor.is_incompatible_with(other_id) {
                continue;
            }

            return Err(if other_id == id {
                ParseError::DuplicateOption(catalog.describe(id))
            } else {
                ParseError::IncompatibleOptions(catalog.describe(other_id), catalog.describe(id))
            });
        }
    }

    Ok(())
}
