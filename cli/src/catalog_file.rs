//! Option catalogs stored as JSON or YAML files.
//!
//! ```yaml
//! options:
//!   - short: f
//!     long: file
//!     flags: [argument_required]
//!     description: the build file
//!   - id: 1000
//!     long: color
//!     flags: [argument_optional, duplicates_allowed]
//!   - short: a
//!     long: all
//!     flags: [argument_disallowed]
//!     incompatible: [b, 1000]
//! ```

use std::fs;
use std::path::Path;

use clargs_core::{Catalog, OptionDescriptor, OptionFlag, OptionId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// One option as written in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionEntry {
    /// Short form character; also the option's id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    /// Numeric id of a long-only option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(default)]
    pub flags: Vec<OptionFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replaces the default incompatible set when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incompatible: Option<Vec<OptionId>>,
}

impl OptionEntry {
    fn option_id(&self) -> Result<OptionId, String> {
        match (self.short, self.id) {
            (Some(ch), None) => Ok(OptionId::Short(ch)),
            (None, Some(0)) => Err(self.invalid("id 0 is reserved for positional text")),
            (None, Some(id)) => Ok(OptionId::LongOnly(id)),
            (Some(_), Some(_)) => Err(self.invalid("both `short` and `id` are set")),
            (None, None) => Err(self.invalid("neither `short` nor `id` is set")),
        }
    }

    fn invalid(&self, reason: &str) -> String {
        match &self.long {
            Some(long) => format!("Invalid option entry --{long}: {reason}"),
            None => format!("Invalid option entry: {reason}"),
        }
    }

    /// Builds the descriptor this entry declares.
    pub fn to_descriptor(&self) -> Result<OptionDescriptor, String> {
        let id = self.option_id()?;
        let mut descriptor = OptionDescriptor::from_flags(id, self.long.as_deref(), &self.flags)
            .map_err(|err| err.to_string())?;
        if let Some(description) = &self.description {
            descriptor = descriptor.with_description(description);
        }
        if let Some(incompatible) = &self.incompatible {
            descriptor = descriptor.incompatible_with(incompatible.iter().copied());
        }
        Ok(descriptor)
    }
}

impl CatalogFile {
    /// Parses a catalog document; YAML when `yaml` is set, JSON otherwise.
    pub fn parse(raw: &str, yaml: bool) -> Result<Self, String> {
        if yaml {
            serde_yaml::from_str(raw).map_err(|err| format!("Invalid YAML catalog: {err}"))
        } else {
            serde_json::from_str(raw).map_err(|err| format!("Invalid JSON catalog: {err}"))
        }
    }

    /// Validates every entry and assembles the catalog.
    pub fn into_catalog(self) -> Result<Catalog, String> {
        let descriptors = self
            .options
            .iter()
            .map(OptionEntry::to_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::new(descriptors).map_err(|err| err.to_string())
    }
}

/// Whether `path` names a YAML document.
pub fn is_yaml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Reads and validates the catalog stored at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    let file = CatalogFile::parse(&raw, is_yaml_path(path))
        .map_err(|err| format!("{err} ('{}')", path.display()))?;

    debug!(path = %path.display(), options = file.options.len(), "Loaded catalog file");
    file.into_catalog()
}
