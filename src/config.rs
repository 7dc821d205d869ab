// WHY: one serde-backed config layer shared by the CLI and library callers
// Every field has a default so a partial JSON file is valid

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{Result, SiftError};
use crate::sanitizer::SanitizeLevel;
use crate::sentence_segmenter::DEFAULT_TERMINATORS;
use crate::sequence_ops::{TrimCategory, DEFAULT_CHUNK_SIZE};

/// How unrecognized level/category names are treated at the API boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValuePolicy {
    /// Reject with `SiftError::UnknownValue`
    Strict,
    /// Emit a warning and fall back to the documented default
    #[default]
    Lenient,
}

impl ValuePolicy {
    /// Apply the policy to an unrecognized name, returning the fallback on the lenient path
    pub fn reject_or<T>(
        self,
        kind: &'static str,
        value: &str,
        expected: &'static [&'static str],
        fallback: T,
    ) -> Result<T> {
        match self {
            ValuePolicy::Strict => Err(SiftError::UnknownValue {
                kind,
                value: value.to_string(),
                expected,
            }),
            ValuePolicy::Lenient => {
                warn!(kind, value, ?expected, "unrecognized value, using fallback");
                Ok(fallback)
            }
        }
    }
}

/// Toolkit configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiftConfig {
    pub value_policy: ValuePolicy,
    /// Default pack size for chunking
    pub chunk_size: usize,
    pub sanitize_level: SanitizeLevel,
    pub trim_category: TrimCategory,
    pub rank_descending: bool,
    pub preserve_order: bool,
    /// Upper bound on rejection-sampling draws
    pub sampler_max_retries: usize,
    /// Sentence terminator characters
    pub terminators: String,
    /// Buffer size for async text reading
    pub reader_buffer_size: usize,
}

impl Default for SiftConfig {
    fn default() -> Self {
        Self {
            value_policy: ValuePolicy::Lenient,
            chunk_size: DEFAULT_CHUNK_SIZE,
            sanitize_level: SanitizeLevel::Normal,
            trim_category: TrimCategory::Both,
            rank_descending: true,
            preserve_order: true,
            sampler_max_retries: crate::sampler::DEFAULT_MAX_RETRIES,
            terminators: DEFAULT_TERMINATORS.iter().collect(),
            reader_buffer_size: 8192,
        }
    }
}

impl SiftConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: SiftConfig = serde_json::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration if a path is given, defaults otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values no operation can run with
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SiftError::invalid("chunk_size must be positive"));
        }
        if self.sampler_max_retries == 0 {
            return Err(SiftError::invalid("sampler_max_retries must be positive"));
        }
        if self.terminators.is_empty() {
            return Err(SiftError::invalid("terminators must not be empty"));
        }
        if self.reader_buffer_size == 0 {
            return Err(SiftError::invalid("reader_buffer_size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = SiftConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 5000);
        assert_eq!(config.terminators, "。！？.!?");
        assert_eq!(config.value_policy, ValuePolicy::Lenient);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("siftkit.json");
        std::fs::write(&path, r#"{"chunk_size": 3, "value_policy": "Strict"}"#).unwrap();

        let config = SiftConfig::load(&path).unwrap();
        assert_eq!(config.chunk_size, 3);
        assert_eq!(config.value_policy, ValuePolicy::Strict);
        assert_eq!(config.trim_category, TrimCategory::Both);
        assert!(config.rank_descending);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"chunk_size": 0}"#).unwrap();

        let result = SiftConfig::load(&path);
        assert!(matches!(result, Err(SiftError::InvalidArgument(_))));
    }

    #[test]
    fn test_policy_fallback() {
        assert_eq!(ValuePolicy::Lenient.reject_or("level", "Weird", &["Plain"], 7).unwrap(), 7);
        let err = ValuePolicy::Strict.reject_or("level", "Weird", &["Plain"], 7).unwrap_err();
        assert_eq!(err.to_string(), "unknown level 'Weird', expected one of [\"Plain\"]");
    }

    #[test]
    fn test_missing_file_without_path_gives_default() {
        let config = SiftConfig::load_or_default(None::<&str>).unwrap();
        assert_eq!(config, SiftConfig::default());
    }
}
