//! Asset identifier extraction from exported label filenames.

use crate::error::{LabelError, Result};
use std::fmt;
use std::path::Path;

/// Substring that marks a file as an exported inventory label.
pub const LABEL_MARKER: &str = "label-";

/// Suffix every label image carries.
pub const IMAGE_SUFFIX: &str = ".png";

/// Marker the file manager appends to duplicate copies, e.g. `label-42(1).png`.
const COPY_MARKER: char = '(';

/// Stable key of one inventory item, as embedded in a label filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    /// Resolve the asset identifier from a label image path.
    ///
    /// The identifier is the part of the file name between [`LABEL_MARKER`]
    /// and [`IMAGE_SUFFIX`], truncated at the first `(` so that duplicate
    /// exports (`label-42(1).png`) resolve to the same id as the original.
    pub fn resolve(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| LabelError::invalid_path(path, "no UTF-8 file name"))?;

        let start = file_name
            .find(LABEL_MARKER)
            .map(|index| index + LABEL_MARKER.len())
            .ok_or_else(|| LabelError::invalid_path(path, "missing label marker"))?;
        let rest = &file_name[start..];

        let end = rest
            .find(IMAGE_SUFFIX)
            .ok_or_else(|| LabelError::invalid_path(path, "missing image suffix"))?;
        let mut id = &rest[..end];

        if let Some(copy) = id.find(COPY_MARKER) {
            id = &id[..copy];
        }

        if id.is_empty() {
            return Err(LabelError::invalid_path(path, "empty asset identifier"));
        }

        Ok(AssetId(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the processed image derived from this id.
    pub fn processed_file_name(&self) -> String {
        format!("{}-processed{}", self.0, IMAGE_SUFFIX)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
