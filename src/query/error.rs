//! Error types for query construction.
//!
//! Every variant renders as the user-facing message returned to the calling
//! agent, so the display text is part of the tool contract.

use thiserror::Error;

/// Filter names listed when a works search has neither a query nor a filter.
pub(crate) const WORKS_FILTER_NAMES: &str =
    "filter_type, filter_year, filter_author_id, or filter_institution_only";

/// Filter names listed when an authors search has neither a query nor a filter.
pub(crate) const AUTHORS_FILTER_NAMES: &str =
    "filter_institution, filter_institution_only, or filter_country";

/// Errors raised while turning typed search parameters into request parameters.
///
/// A `QueryError` always means no network request was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Blank free text and no filter at all
    #[error("Error: Either provide a search query or at least one filter ({filters}).")]
    MissingCriteria {
        /// Filter names the caller could have supplied
        filters: &'static str,
    },

    /// Publication year is neither `YYYY` nor an ascending `YYYY-YYYY` range
    #[error(
        "Error: Invalid publication year filter '{value}'. Use a single year (e.g. 2020) or an inclusive range (e.g. 2020-2023)."
    )]
    InvalidYear {
        /// The rejected filter value
        value: String,
    },

    /// Sort expression outside the supported set
    #[error("Error: Unsupported sort '{value}'. Expected one of: {expected}.")]
    UnknownSort {
        /// The rejected sort expression
        value: String,
        /// Comma-separated list of accepted expressions
        expected: String,
    },

    /// Institution-only filter requested without a configured home institution
    #[error(
        "Error: No home institution is configured. Set `institution_id` to use the institution-only filter."
    )]
    InstitutionNotConfigured,

    /// Work lookup without an identifier
    #[error("Error: A work ID or DOI is required.")]
    MissingWorkId,
}

impl QueryError {
    /// Creates a `MissingCriteria` error for the works endpoint.
    #[must_use]
    pub fn missing_works_criteria() -> Self {
        Self::MissingCriteria {
            filters: WORKS_FILTER_NAMES,
        }
    }

    /// Creates a `MissingCriteria` error for the authors endpoint.
    #[must_use]
    pub fn missing_authors_criteria() -> Self {
        Self::MissingCriteria {
            filters: AUTHORS_FILTER_NAMES,
        }
    }

    /// Creates an `InvalidYear` error.
    #[must_use]
    pub fn invalid_year(value: &str) -> Self {
        Self::InvalidYear {
            value: value.to_string(),
        }
    }

    /// Creates an `UnknownSort` error listing the accepted expressions.
    #[must_use]
    pub fn unknown_sort(value: &str, expected: &[&str]) -> Self {
        Self::UnknownSort {
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}
