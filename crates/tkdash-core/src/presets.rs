//! Initial tag combinations loaded from a YAML presets file.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::tags::{normalize_tags, TagCombinations, LABEL_SEPARATOR};
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagPreset {
    pub tags: Vec<String>,
    pub label: Option<String>,
}

impl TagPreset {
    /// The label shown for this preset: the explicit one, or the normalized
    /// tags joined by `" + "`.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map_or_else(
                || normalize_tags(self.tags.as_slice()).join(LABEL_SEPARATOR),
                str::to_string,
            )
    }
}

#[derive(Debug, Deserialize)]
pub struct TagPresetsFile {
    pub combinations: Vec<TagPreset>,
}

impl TagPresetsFile {
    /// Builds the combination list, assigning ids `1..=n` in file order.
    #[must_use]
    pub fn to_combinations(&self) -> TagCombinations {
        self.combinations
            .iter()
            .fold(TagCombinations::empty(), |acc, preset| {
                acc.with_added(preset.tags.as_slice(), preset.label.as_deref())
            })
    }
}

/// Load and validate tag presets from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tag_presets(path: &Path) -> Result<TagPresetsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::PresetsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let presets: TagPresetsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::PresetsFileParse)?;

    validate_presets(&presets)?;

    Ok(presets)
}

/// Load presets if the file exists, otherwise fall back to the built-in default.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but is unreadable or invalid.
pub fn load_tag_combinations(path: &Path) -> Result<TagCombinations, ConfigError> {
    if !path.exists() {
        tracing::info!(
            path = %path.display(),
            "no tag presets file; using built-in default combination"
        );
        return Ok(TagCombinations::default());
    }
    Ok(load_tag_presets(path)?.to_combinations())
}

fn validate_presets(presets: &TagPresetsFile) -> Result<(), ConfigError> {
    let mut seen_labels = HashSet::new();

    for (idx, preset) in presets.combinations.iter().enumerate() {
        if normalize_tags(preset.tags.as_slice()).is_empty() {
            return Err(ConfigError::Validation(format!(
                "combination #{} must list at least one non-blank tag",
                idx + 1
            )));
        }

        let label = preset.display_label();
        if !seen_labels.insert(label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate combination label: '{label}'"
            )));
        }
    }

    Ok(())
}
