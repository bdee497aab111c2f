use serde::Deserialize;

/// Default content-extraction endpoint
pub const DEFAULT_ENDPOINT: &str = "https://readability.com/api/content/v1/parser";

/// Main configuration structure for Automobile
///
/// Every table is optional; a missing table takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

/// Content-extraction service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractionConfig {
    /// Parser endpoint queried with `token` and `url` parameters
    pub endpoint: String,

    /// API token; must be set before anything can be fetched
    pub token: String,

    /// Request timeout in seconds (no timeout when absent)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            timeout_secs: None,
        }
    }
}

/// Article cache configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Cache file; relative paths are resolved against the executable's directory
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "article-cache".to_string(),
        }
    }
}

/// External conversion command configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Program and leading arguments; the package directory is appended
    pub command: Vec<String>,

    /// Extension of the artifact the command writes next to the package
    #[serde(rename = "output-extension")]
    pub output_extension: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: vec!["make-mobi".to_string()],
            output_extension: "mobi".to_string(),
        }
    }
}

/// Sanitizer configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SanitizerConfig {
    /// Write non-ASCII characters as numeric character references instead of failing
    #[serde(rename = "escape-non-ascii")]
    pub escape_non_ascii: bool,
}
