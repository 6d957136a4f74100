//! Runtime configuration for the OpenAlex tool set.

use serde::Deserialize;

/// Public OpenAlex API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openalex.org";

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Externally supplied settings for the tool set.
///
/// Deserializes from JSON with every field optional, so agent frameworks can
/// pass a partial object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpenAlexConfig {
    /// When false the tool set is empty and the CLI refuses to run queries.
    pub enabled: bool,
    pub base_url: String,
    /// Polite-pool contact used when a call does not supply its own.
    pub contact_email: Option<String>,
    /// Home institution for the institution-only filters, e.g. `I92446798`.
    pub institution_id: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for OpenAlexConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: DEFAULT_BASE_URL.to_string(),
            contact_email: None,
            institution_id: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}

impl OpenAlexConfig {
    /// Returns a copy pointed at a different service root (used with wiremock in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_contact_email(mut self, contact_email: impl Into<String>) -> Self {
        self.contact_email = Some(contact_email.into());
        self
    }

    #[must_use]
    pub fn with_institution_id(mut self, institution_id: impl Into<String>) -> Self {
        self.institution_id = Some(institution_id.into());
        self
    }
}
