//! Supported sort expressions for the works and authors endpoints.

use std::fmt;
use std::str::FromStr;

use super::QueryError;

/// Sort order for works searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkSort {
    /// Service-side relevance ranking (the service default)
    #[default]
    Relevance,
    CitedByCountDesc,
    CitedByCountAsc,
    PublicationDateDesc,
    PublicationDateAsc,
}

impl WorkSort {
    /// Every supported works sort, in documentation order.
    pub const ALL: [Self; 5] = [
        Self::Relevance,
        Self::CitedByCountDesc,
        Self::CitedByCountAsc,
        Self::PublicationDateDesc,
        Self::PublicationDateAsc,
    ];

    /// Returns the wire expression for this sort.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance_score:desc",
            Self::CitedByCountDesc => "cited_by_count:desc",
            Self::CitedByCountAsc => "cited_by_count:asc",
            Self::PublicationDateDesc => "publication_date:desc",
            Self::PublicationDateAsc => "publication_date:asc",
        }
    }

    /// True when the service would apply this order without a `sort` parameter.
    #[must_use]
    pub fn is_service_default(self) -> bool {
        self == Self::Relevance
    }
}

impl fmt::Display for WorkSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkSort {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == trimmed)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|sort| sort.as_str()).collect();
                QueryError::unknown_sort(value, &expected)
            })
    }
}

/// Sort order for authors searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorSort {
    /// Service-side relevance ranking (the service default)
    #[default]
    Relevance,
    CitedByCountDesc,
    CitedByCountAsc,
    WorksCountDesc,
    WorksCountAsc,
    HIndexDesc,
    I10IndexDesc,
}

impl AuthorSort {
    /// Every supported authors sort, in documentation order.
    pub const ALL: [Self; 7] = [
        Self::Relevance,
        Self::CitedByCountDesc,
        Self::CitedByCountAsc,
        Self::WorksCountDesc,
        Self::WorksCountAsc,
        Self::HIndexDesc,
        Self::I10IndexDesc,
    ];

    /// Returns the wire expression for this sort.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance_score:desc",
            Self::CitedByCountDesc => "cited_by_count:desc",
            Self::CitedByCountAsc => "cited_by_count:asc",
            Self::WorksCountDesc => "works_count:desc",
            Self::WorksCountAsc => "works_count:asc",
            Self::HIndexDesc => "summary_stats.h_index:desc",
            Self::I10IndexDesc => "summary_stats.i10_index:desc",
        }
    }

    /// True when the service would apply this order without a `sort` parameter.
    #[must_use]
    pub fn is_service_default(self) -> bool {
        self == Self::Relevance
    }
}

impl fmt::Display for AuthorSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthorSort {
    type Err = QueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == trimmed)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|sort| sort.as_str()).collect();
                QueryError::unknown_sort(value, &expected)
            })
    }
}
