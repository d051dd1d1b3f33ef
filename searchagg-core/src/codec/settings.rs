use serde::{Deserialize, Serialize};

/// Tunables of a [`super::JsonCodec`].
///
/// Every field has a default, so a partial config file (JSON, TOML, ...) is enough:
///
/// ```rust
/// use searchagg_core::codec::CodecSettings;
///
/// let settings: CodecSettings = serde_json::from_str(r#"{ "max_depth": 64 }"#).unwrap();
/// assert_eq!(settings.max_depth, Some(64));
/// assert_eq!(settings.typed_keys_separator, '#');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecSettings {
    /// Maximum number of node levels accepted when decoding, counting the root as 1.
    /// `None` accepts trees of any depth.
    pub max_depth: Option<usize>,
    /// Pretty-print encoded output.
    pub pretty: bool,
    /// Separator between kind and name in typed keys (`sterms#by_customer`).
    pub typed_keys_separator: char,
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            max_depth: None,
            pretty: false,
            typed_keys_separator: '#',
        }
    }
}

impl CodecSettings {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_typed_keys_separator(mut self, separator: char) -> Self {
        self.typed_keys_separator = separator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = CodecSettings::default();

        assert_eq!(settings.max_depth, None);
        assert!(!settings.pretty);
        assert_eq!(settings.typed_keys_separator, '#');
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: CodecSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, CodecSettings::default());
    }

    #[test]
    fn test_with_setters() {
        let settings = CodecSettings::default()
            .with_max_depth(8)
            .with_pretty(true)
            .with_typed_keys_separator('|');

        assert_eq!(settings.max_depth, Some(8));
        assert!(settings.pretty);
        assert_eq!(settings.typed_keys_separator, '|');
    }
}
