//! Asset names and their extension hint.

use std::fmt;

/// An immutable reference to a downloadable asset, identified by file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference {
    name: String,
}

impl AssetReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token after the final `.`, or the whole name when there is none.
    ///
    /// Case is preserved: `MODEL.OBJ` yields `OBJ`.
    pub fn extension(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => &self.name,
        }
    }
}

impl fmt::Display for AssetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for AssetReference {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for AssetReference {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_last_segment() {
        assert_eq!(AssetReference::new("scan.2024.svox2").extension(), "svox2");
        assert_eq!(AssetReference::new("scene.json").extension(), "json");
    }

    #[test]
    fn test_extension_without_dot_is_whole_name() {
        assert_eq!(AssetReference::new("README").extension(), "README");
    }

    #[test]
    fn test_trailing_dot_gives_empty_extension() {
        assert_eq!(AssetReference::new("broken.").extension(), "");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(AssetReference::new("MODEL.OBJ").extension(), "OBJ");
    }
}
