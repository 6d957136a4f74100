//! Request construction for the OpenAlex works and authors endpoints.
//!
//! Builders translate typed search parameters into the ordered query-parameter
//! list the service expects. Validation happens here, before dispatch, so a
//! rejected request never reaches the network.
//!
//! # Example
//!
//! ```
//! use openalex_tools::query::{WorksSearchRequest, build_works_search};
//!
//! let request = WorksSearchRequest {
//!     work_type: Some("article".to_string()),
//!     year: Some("2020".to_string()),
//!     ..WorksSearchRequest::default()
//! };
//! let params = build_works_search(&request, None).unwrap();
//! assert_eq!(params.get("filter"), Some("type:article,publication_year:2020"));
//! assert_eq!(params.get("search"), None);
//! ```

mod error;
mod sort;

pub use error::QueryError;
pub use sort::{AuthorSort, WorkSort};

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::record::extract_id;

/// Smallest page size the service accepts.
pub const MIN_RESULT_LIMIT: u32 = 1;
/// Largest page size the service accepts.
pub const MAX_RESULT_LIMIT: u32 = 200;
/// Page size used when the caller does not choose one.
pub const DEFAULT_RESULT_LIMIT: i64 = 10;

/// `YYYY` or `YYYY-YYYY`.
#[allow(clippy::expect_used)]
static YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})(?:-(\d{4}))?$").expect("year regex is valid") // Static pattern, safe to panic
});

/// DOI spellings reduced to the bare `10.` form before routing a work lookup.
const DOI_PREFIXES: [&str; 4] = [
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "doi:",
];

/// Clamps a requested result limit into `[MIN_RESULT_LIMIT, MAX_RESULT_LIMIT]`.
///
/// Out-of-range input is never an error.
#[must_use]
pub fn clamp_limit(limit: i64) -> u32 {
    let clamped = limit.clamp(i64::from(MIN_RESULT_LIMIT), i64::from(MAX_RESULT_LIMIT));
    u32::try_from(clamped).unwrap_or(MAX_RESULT_LIMIT)
}

/// Ordered query parameters for one service request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    fn push_contact(&mut self, contact_email: Option<&str>) {
        if let Some(email) = contact_email.map(str::trim).filter(|email| !email.is_empty()) {
            self.push("mailto", email);
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True when no parameter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One `field:value` filter clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    field: &'static str,
    value: String,
}

impl FilterClause {
    /// Creates a filter clause.
    #[must_use]
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// Joins filter clauses in order with `,`.
#[must_use]
pub fn join_filters(filters: &[FilterClause]) -> String {
    filters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Publication year filter: a single year or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    Single(u16),
    Range(u16, u16),
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(year) => write!(f, "{year}"),
            Self::Range(start, end) => write!(f, "{start}-{end}"),
        }
    }
}

impl FromStr for YearFilter {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let captures = YEAR_PATTERN
            .captures(value.trim())
            .ok_or_else(|| QueryError::invalid_year(value))?;
        let parse = |text: &str| {
            text.parse::<u16>()
                .map_err(|_| QueryError::invalid_year(value))
        };
        let start = parse(&captures[1])?;
        match captures.get(2) {
            None => Ok(Self::Single(start)),
            Some(end) => {
                let end = parse(end.as_str())?;
                if start > end {
                    return Err(QueryError::invalid_year(value));
                }
                Ok(Self::Range(start, end))
            }
        }
    }
}

/// Parameters for a works search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksSearchRequest {
    /// Free-text query; may be blank when a filter is set.
    pub query: String,
    /// Requested page size, clamped into `[1, 200]`.
    pub limit: i64,
    pub sort: WorkSort,
    /// Work type, e.g. `article` or `preprint`.
    pub work_type: Option<String>,
    /// `YYYY` or `YYYY-YYYY`.
    pub year: Option<String>,
    /// Author identifier, bare (`A123`) or as a full service URL.
    pub author_id: Option<String>,
    /// Restrict to works with an author at the configured home institution.
    pub institution_only: bool,
    /// Polite-pool contact address, passed through unchanged.
    pub contact_email: Option<String>,
}

impl Default for WorksSearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_RESULT_LIMIT,
            sort: WorkSort::default(),
            work_type: None,
            year: None,
            author_id: None,
            institution_only: false,
            contact_email: None,
        }
    }
}

/// Parameters for an authors search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorsSearchRequest {
    pub query: String,
    pub limit: i64,
    pub sort: AuthorSort,
    /// Explicit institution identifier; takes precedence over `institution_only`.
    pub institution_id: Option<String>,
    /// Restrict to authors last seen at the configured home institution.
    pub institution_only: bool,
    /// ISO 3166-1 alpha-2 country code of the last known institution.
    pub country: Option<String>,
    pub contact_email: Option<String>,
}

impl Default for AuthorsSearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: DEFAULT_RESULT_LIMIT,
            sort: AuthorSort::default(),
            institution_id: None,
            institution_only: false,
            country: None,
            contact_email: None,
        }
    }
}

/// Request path and parameters for a single-work lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkLookup {
    /// Path relative to the service base URL, e.g. `/works/W123`.
    pub path: String,
    pub params: QueryParams,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn home_institution(configured: Option<&str>) -> Result<&str, QueryError> {
    non_blank(configured)
        .map(extract_id)
        .ok_or(QueryError::InstitutionNotConfigured)
}

/// Builds the query parameters for `GET /works`.
///
/// `home_institution_id` is the configured institution used when
/// `request.institution_only` is set.
///
/// # Errors
///
/// Returns [`QueryError::MissingCriteria`] when the query is blank and no
/// filter is set, [`QueryError::InvalidYear`] for a malformed year filter and
/// [`QueryError::InstitutionNotConfigured`] when the institution-only filter
/// has nothing to filter on.
#[tracing::instrument(skip_all, fields(limit = request.limit, sort = %request.sort))]
pub fn build_works_search(
    request: &WorksSearchRequest,
    home_institution_id: Option<&str>,
) -> Result<QueryParams, QueryError> {
    let work_type = non_blank(request.work_type.as_deref());
    let year = non_blank(request.year.as_deref());
    let author_id = non_blank(request.author_id.as_deref());
    let search = non_blank(Some(request.query.as_str()));

    if search.is_none()
        && work_type.is_none()
        && year.is_none()
        && author_id.is_none()
        && !request.institution_only
    {
        return Err(QueryError::missing_works_criteria());
    }

    let mut filters = Vec::new();
    if let Some(work_type) = work_type {
        filters.push(FilterClause::new("type", work_type));
    }
    if let Some(year) = year {
        let year: YearFilter = year.parse()?;
        filters.push(FilterClause::new("publication_year", year.to_string()));
    }
    if let Some(author_id) = author_id {
        filters.push(FilterClause::new(
            "authorships.author.id",
            extract_id(author_id),
        ));
    }
    if request.institution_only {
        filters.push(FilterClause::new(
            "authorships.institutions.id",
            home_institution(home_institution_id)?,
        ));
    }

    let mut params = QueryParams::new();
    if let Some(search) = search {
        params.push("search", search);
    }
    params.push("per-page", clamp_limit(request.limit).to_string());
    if !request.sort.is_service_default() {
        params.push("sort", request.sort.as_str());
    }
    params.push_contact(request.contact_email.as_deref());
    if !filters.is_empty() {
        params.push("filter", join_filters(&filters));
    }

    debug!(params = params.len(), filters = filters.len(), "Built works search");
    Ok(params)
}

/// Builds the query parameters for `GET /authors`.
///
/// # Errors
///
/// Returns [`QueryError::MissingCriteria`] when the query is blank and no
/// filter is set, and [`QueryError::InstitutionNotConfigured`] when the
/// institution-only filter has nothing to filter on.
#[tracing::instrument(skip_all, fields(limit = request.limit, sort = %request.sort))]
pub fn build_authors_search(
    request: &AuthorsSearchRequest,
    home_institution_id: Option<&str>,
) -> Result<QueryParams, QueryError> {
    let institution_id = non_blank(request.institution_id.as_deref());
    let country = non_blank(request.country.as_deref());
    let search = non_blank(Some(request.query.as_str()));

    if search.is_none() && institution_id.is_none() && country.is_none() && !request.institution_only
    {
        return Err(QueryError::missing_authors_criteria());
    }

    let mut filters = Vec::new();
    if let Some(institution_id) = institution_id {
        filters.push(FilterClause::new(
            "last_known_institutions.id",
            extract_id(institution_id),
        ));
    } else if request.institution_only {
        filters.push(FilterClause::new(
            "last_known_institutions.id",
            home_institution(home_institution_id)?,
        ));
    }
    if let Some(country) = country {
        filters.push(FilterClause::new(
            "last_known_institutions.country_code",
            country.to_ascii_uppercase(),
        ));
    }

    let mut params = QueryParams::new();
    if let Some(search) = search {
        params.push("search", search);
    }
    params.push("per-page", clamp_limit(request.limit).to_string());
    if !request.sort.is_service_default() {
        params.push("sort", request.sort.as_str());
    }
    params.push_contact(request.contact_email.as_deref());
    if !filters.is_empty() {
        params.push("filter", join_filters(&filters));
    }

    debug!(params = params.len(), filters = filters.len(), "Built authors search");
    Ok(params)
}

/// Reduces `https://doi.org/…` and `doi:` spellings to the bare DOI.
fn strip_doi_prefix(work_id: &str) -> &str {
    for prefix in DOI_PREFIXES {
        if work_id
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            return work_id[prefix.len()..].trim_start();
        }
    }
    work_id
}

/// Builds the path and parameters for a single-work lookup.
///
/// DOIs (`10.` prefix) route to `/works/doi:{doi}`; anything else is treated
/// as a native identifier and routes to `/works/{id}`.
///
/// # Errors
///
/// Returns [`QueryError::MissingWorkId`] for a blank identifier.
pub fn build_work_lookup(
    work_id: &str,
    contact_email: Option<&str>,
) -> Result<WorkLookup, QueryError> {
    let trimmed = work_id.trim();
    if trimmed.is_empty() {
        return Err(QueryError::MissingWorkId);
    }

    let candidate = strip_doi_prefix(trimmed);
    let path = if candidate.starts_with("10.") {
        format!("/works/doi:{candidate}")
    } else {
        format!("/works/{}", extract_id(candidate))
    };

    let mut params = QueryParams::new();
    params.push_contact(contact_email);

    debug!(%path, "Built work lookup");
    Ok(WorkLookup { path, params })
}
