//! OpenAlex service client.
//!
//! [`OpenAlexClient`] runs the three read-only operations (works search, work
//! lookup, authors search). Each call is one request/response round trip and
//! always yields a `String`: the formatted records, a "no results" message, or
//! an error message. Nothing is cached between calls and the client holds no
//! mutable state, so it can be cloned and shared freely.
//!
//! # Example
//!
//! ```no_run
//! use openalex_tools::{OpenAlexClient, OpenAlexConfig, WorksSearchRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAlexClient::new(&OpenAlexConfig::default())?;
//! let request = WorksSearchRequest {
//!     query: "soil carbon".to_string(),
//!     ..WorksSearchRequest::default()
//! };
//! println!("{}", client.search_works(&request).await);
//! # Ok(())
//! # }
//! ```

mod error;
mod http_client;

pub use error::ServiceError;
pub use http_client::{build_http_client, default_user_agent, normalize_base_url};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::OpenAlexConfig;
use crate::format::{format_authors_list, format_work_detail, format_works_list};
use crate::query::{
    AuthorsSearchRequest, QueryParams, WorksSearchRequest, build_authors_search,
    build_work_lookup, build_works_search, clamp_limit,
};
use crate::record::Record;

/// Prefix for transport and decoding failures.
pub const SERVICE_ERROR_PREFIX: &str = "Error accessing OpenAlex API:";
/// Returned when a work lookup answers 404.
pub const WORK_NOT_FOUND: &str = "Work not found. Please check the work ID or DOI.";

/// Outcome of one round trip that reached the service.
#[derive(Debug)]
enum Fetched {
    Json(Value),
    Status { code: u16, body: String },
}

/// Read-only client for the OpenAlex works and authors endpoints.
#[derive(Clone)]
pub struct OpenAlexClient {
    client: Client,
    base_url: String,
    contact_email: Option<String>,
    institution_id: Option<String>,
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient")
            .field("base_url", &self.base_url)
            .field("contact_email", &self.contact_email)
            .field("institution_id", &self.institution_id)
            .finish_non_exhaustive()
    }
}

impl OpenAlexClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the base URL is invalid or the HTTP
    /// client cannot be built.
    #[tracing::instrument(skip_all, fields(base_url = %config.base_url))]
    pub fn new(config: &OpenAlexConfig) -> Result<Self, ServiceError> {
        let base_url = normalize_base_url(&config.base_url)?;
        let client = build_http_client(config)?;
        Ok(Self {
            client,
            base_url,
            contact_email: config.contact_email.clone(),
            institution_id: config.institution_id.clone(),
        })
    }

    /// Service root without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured home institution, if any.
    #[must_use]
    pub fn institution_id(&self) -> Option<&str> {
        self.institution_id.as_deref()
    }

    fn contact_or_default(&self, requested: Option<&str>) -> Option<String> {
        requested
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .or(self.contact_email.as_deref())
            .map(ToString::to_string)
    }

    /// Searches works and renders the result page.
    #[tracing::instrument(skip(self, request), fields(query = %request.query, limit = request.limit))]
    pub async fn search_works(&self, request: &WorksSearchRequest) -> String {
        let request = WorksSearchRequest {
            contact_email: self.contact_or_default(request.contact_email.as_deref()),
            ..request.clone()
        };
        let params = match build_works_search(&request, self.institution_id()) {
            Ok(params) => params,
            Err(error) => {
                debug!(error = %error, "Works search rejected before dispatch");
                return error.to_string();
            }
        };

        match self.fetch("/works", &params).await {
            Ok(Fetched::Json(data)) => {
                let works = Record::new(&data).list("results");
                debug!(results = works.len(), "Works search succeeded");
                format_works_list(works, clamp_limit(request.limit))
            }
            Ok(Fetched::Status { code, body }) => {
                warn!(status = code, "Works search returned an error status");
                format!("Error searching OpenAlex: HTTP {code} - {body}")
            }
            Err(error) => {
                warn!(error = %error, "Works search failed");
                format!("{SERVICE_ERROR_PREFIX} {error}")
            }
        }
    }

    /// Looks up one work by OpenAlex identifier or DOI and renders the detail view.
    #[tracing::instrument(skip(self, contact_email), fields(work_id = %work_id))]
    pub async fn get_work_details(&self, work_id: &str, contact_email: Option<&str>) -> String {
        let contact = self.contact_or_default(contact_email);
        let lookup = match build_work_lookup(work_id, contact.as_deref()) {
            Ok(lookup) => lookup,
            Err(error) => {
                debug!(error = %error, "Work lookup rejected before dispatch");
                return error.to_string();
            }
        };

        match self.fetch(&lookup.path, &lookup.params).await {
            Ok(Fetched::Json(work)) => format_work_detail(&work),
            Ok(Fetched::Status { code: 404, .. }) => {
                debug!("Work not found");
                WORK_NOT_FOUND.to_string()
            }
            Ok(Fetched::Status { code, body }) => {
                warn!(status = code, "Work lookup returned an error status");
                format!("Error retrieving work details: HTTP {code} - {body}")
            }
            Err(error) => {
                warn!(error = %error, "Work lookup failed");
                format!("{SERVICE_ERROR_PREFIX} {error}")
            }
        }
    }

    /// Searches authors and renders the result page.
    #[tracing::instrument(skip(self, request), fields(query = %request.query, limit = request.limit))]
    pub async fn search_authors(&self, request: &AuthorsSearchRequest) -> String {
        let request = AuthorsSearchRequest {
            contact_email: self.contact_or_default(request.contact_email.as_deref()),
            ..request.clone()
        };
        let params = match build_authors_search(&request, self.institution_id()) {
            Ok(params) => params,
            Err(error) => {
                debug!(error = %error, "Authors search rejected before dispatch");
                return error.to_string();
            }
        };

        match self.fetch("/authors", &params).await {
            Ok(Fetched::Json(data)) => {
                let authors = Record::new(&data).list("results");
                debug!(results = authors.len(), "Authors search succeeded");
                format_authors_list(authors, clamp_limit(request.limit))
            }
            Ok(Fetched::Status { code, body }) => {
                warn!(status = code, "Authors search returned an error status");
                format!("Error searching OpenAlex: HTTP {code} - {body}")
            }
            Err(error) => {
                warn!(error = %error, "Authors search failed");
                format!("{SERVICE_ERROR_PREFIX} {error}")
            }
        }
    }

    fn endpoint(&self, path: &str, params: &QueryParams) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|error| ServiceError::invalid_base_url(&self.base_url, error.to_string()))?;
        // Segments are pushed one by one so '#', '?' and '%' inside an id stay in the path.
        url.path_segments_mut()
            .map_err(|()| ServiceError::invalid_base_url(&self.base_url, "cannot be a base URL"))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        Ok(url)
    }

    async fn fetch(&self, path: &str, params: &QueryParams) -> Result<Fetched, ServiceError> {
        let url = self.endpoint(path, params)?;
        debug!(api_url = %url, "Calling OpenAlex API");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Ok(Fetched::Status {
                code: status.as_u16(),
                body,
            });
        }
        Ok(Fetched::Json(serde_json::from_str(&body)?))
    }
}
