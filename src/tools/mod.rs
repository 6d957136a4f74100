//! Agent-facing tool wrappers around [`OpenAlexClient`].
//!
//! Each [`Tool`] takes loosely typed JSON arguments, as produced by a
//! tool-calling agent, and always answers with a string. [`build_tool_set`]
//! assembles the three tools in a fixed order, or none when the configuration
//! disables them.
//!
//! # Object Safety
//!
//! `Tool` uses `async_trait` so tool sets can hold `Box<dyn Tool>`.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{OpenAlexClient, ServiceError};
use crate::config::OpenAlexConfig;
use crate::query::{
    AuthorSort, AuthorsSearchRequest, DEFAULT_RESULT_LIMIT, WorkSort, WorksSearchRequest,
};

pub const SEARCH_WORKS_TOOL: &str = "search_works_openalex";
pub const GET_WORK_DETAILS_TOOL: &str = "get_work_details_openalex";
pub const SEARCH_AUTHORS_TOOL: &str = "search_authors_openalex";

/// A named operation an agent can call with JSON arguments.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Stable tool name used by the agent to select the tool.
    fn name(&self) -> &'static str;

    /// Human-readable description shown to the agent.
    fn description(&self) -> &'static str;

    /// Runs the tool. Never fails: every outcome is rendered as text.
    async fn invoke(&self, arguments: &Value) -> String;
}

/// Deserializes tool arguments; a JSON `null` means "all defaults".
fn parse_arguments<T>(tool: &str, arguments: &Value) -> Result<T, String>
where
    T: DeserializeOwned + Default,
{
    if arguments.is_null() {
        return Ok(T::default());
    }
    T::deserialize(arguments).map_err(|error| {
        debug!(tool, error = %error, "Rejected tool arguments");
        format!("Error: invalid arguments for {tool}: {error}")
    })
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SearchWorksArgs {
    query: Option<String>,
    limit: i64,
    sort_by: Option<String>,
    filter_type: Option<String>,
    filter_year: Option<String>,
    filter_author_id: Option<String>,
    #[serde(alias = "filter_csu_only")]
    filter_institution_only: Option<bool>,
    email: Option<String>,
}

impl Default for SearchWorksArgs {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_RESULT_LIMIT,
            sort_by: None,
            filter_type: None,
            filter_year: None,
            filter_author_id: None,
            filter_institution_only: None,
            email: None,
        }
    }
}

impl SearchWorksArgs {
    fn into_request(self) -> Result<WorksSearchRequest, String> {
        let sort = match self.sort_by.as_deref() {
            Some(sort) if !sort.trim().is_empty() => {
                sort.parse::<WorkSort>().map_err(|error| error.to_string())?
            }
            _ => WorkSort::default(),
        };
        Ok(WorksSearchRequest {
            query: self.query.unwrap_or_default(),
            limit: self.limit,
            sort,
            work_type: self.filter_type,
            year: self.filter_year,
            author_id: self.filter_author_id,
            institution_only: self.filter_institution_only.unwrap_or(false),
            contact_email: self.email,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WorkDetailsArgs {
    work_id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SearchAuthorsArgs {
    query: Option<String>,
    limit: i64,
    sort_by: Option<String>,
    filter_institution: Option<String>,
    #[serde(alias = "filter_csu_only")]
    filter_institution_only: Option<bool>,
    filter_country: Option<String>,
    email: Option<String>,
}

impl Default for SearchAuthorsArgs {
    fn default() -> Self {
        Self {
            query: None,
            limit: DEFAULT_RESULT_LIMIT,
            sort_by: None,
            filter_institution: None,
            filter_institution_only: None,
            filter_country: None,
            email: None,
        }
    }
}

impl SearchAuthorsArgs {
    fn into_request(self) -> Result<AuthorsSearchRequest, String> {
        let sort = match self.sort_by.as_deref() {
            Some(sort) if !sort.trim().is_empty() => {
                sort.parse::<AuthorSort>().map_err(|error| error.to_string())?
            }
            _ => AuthorSort::default(),
        };
        Ok(AuthorsSearchRequest {
            query: self.query.unwrap_or_default(),
            limit: self.limit,
            sort,
            institution_id: self.filter_institution,
            institution_only: self.filter_institution_only.unwrap_or(false),
            country: self.filter_country,
            contact_email: self.email,
        })
    }
}

/// Searches works by free text and/or filters.
#[derive(Debug, Clone)]
pub struct SearchWorksTool {
    client: OpenAlexClient,
}

impl SearchWorksTool {
    #[must_use]
    pub fn new(client: OpenAlexClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchWorksTool {
    fn name(&self) -> &'static str {
        SEARCH_WORKS_TOOL
    }

    fn description(&self) -> &'static str {
        "Search OpenAlex for academic works by free text and/or filters (type, publication \
         year, author ID, home institution). Returns titles, authors, venue, citations, DOI, \
         concepts, keywords and full abstracts. To list an author's works, first find the \
         author with search_authors_openalex, then pass their ID as filter_author_id."
    }

    async fn invoke(&self, arguments: &Value) -> String {
        let request = match parse_arguments::<SearchWorksArgs>(self.name(), arguments)
            .and_then(SearchWorksArgs::into_request)
        {
            Ok(request) => request,
            Err(message) => return message,
        };
        self.client.search_works(&request).await
    }
}

/// Fetches one work by OpenAlex ID or DOI.
#[derive(Debug, Clone)]
pub struct GetWorkDetailsTool {
    client: OpenAlexClient,
}

impl GetWorkDetailsTool {
    #[must_use]
    pub fn new(client: OpenAlexClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetWorkDetailsTool {
    fn name(&self) -> &'static str {
        GET_WORK_DETAILS_TOOL
    }

    fn description(&self) -> &'static str {
        "Get detailed information about one academic work by OpenAlex ID (e.g. W2741809807) \
         or DOI (e.g. 10.7717/peerj.4375)."
    }

    async fn invoke(&self, arguments: &Value) -> String {
        match parse_arguments::<WorkDetailsArgs>(self.name(), arguments) {
            Ok(args) => {
                self.client
                    .get_work_details(&args.work_id, args.email.as_deref())
                    .await
            }
            Err(message) => message,
        }
    }
}

/// Searches authors by name/topic and institution filters.
#[derive(Debug, Clone)]
pub struct SearchAuthorsTool {
    client: OpenAlexClient,
}

impl SearchAuthorsTool {
    #[must_use]
    pub fn new(client: OpenAlexClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchAuthorsTool {
    fn name(&self) -> &'static str {
        SEARCH_AUTHORS_TOOL
    }

    fn description(&self) -> &'static str {
        "Search OpenAlex for authors. Returns institution, works and citation counts, \
         h-index, i10-index, research areas and the author's OpenAlex ID."
    }

    async fn invoke(&self, arguments: &Value) -> String {
        let request = match parse_arguments::<SearchAuthorsArgs>(self.name(), arguments)
            .and_then(SearchAuthorsArgs::into_request)
        {
            Ok(request) => request,
            Err(message) => return message,
        };
        self.client.search_authors(&request).await
    }
}

/// Ordered collection of tools offered to an agent.
#[derive(Default)]
pub struct ToolSet {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolSet {
    /// Creates an empty tool set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool at the end of the set.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        debug!(name = tool.name(), "Registering tool");
        self.tools.push(tool);
    }

    /// Looks a tool up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(Box::as_ref)
    }

    /// Tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Invokes the named tool, or reports an unknown tool name.
    pub async fn invoke(&self, name: &str, arguments: &Value) -> String {
        match self.get(name) {
            Some(tool) => tool.invoke(arguments).await,
            None => format!("Error: unknown tool '{name}'"),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.names())
            .finish()
    }
}

/// Builds the OpenAlex tool set from configuration.
///
/// Returns an empty set when `config.enabled` is false.
///
/// # Errors
///
/// Returns [`ServiceError`] when the shared client cannot be constructed.
pub fn build_tool_set(config: &OpenAlexConfig) -> Result<ToolSet, ServiceError> {
    let mut tools = ToolSet::new();
    if !config.enabled {
        info!("OpenAlex tools disabled by configuration");
        return Ok(tools);
    }

    let client = OpenAlexClient::new(config)?;
    tools.register(Box::new(SearchWorksTool::new(client.clone())));
    tools.register(Box::new(GetWorkDetailsTool::new(client.clone())));
    tools.register(Box::new(SearchAuthorsTool::new(client)));
    Ok(tools)
}
