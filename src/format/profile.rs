//! Formatting profiles for list and detail renderings.

/// Concepts at or below this score are omitted.
pub const CONCEPT_SCORE_THRESHOLD: f64 = 0.3;

/// Suffix wording used when an author list is truncated.
///
/// List and detail renderings historically used different wordings; both are
/// kept and chosen per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowWording {
    /// `A, B, C and 4 others`
    Others,
    /// `A, B, C... and 4 more`
    More,
}

impl OverflowWording {
    /// Renders the suffix appended after the last shown author.
    #[must_use]
    pub fn suffix(self, hidden: usize) -> String {
        match self {
            Self::Others => format!(" and {hidden} others"),
            Self::More => format!("... and {hidden} more"),
        }
    }
}

/// How the concept cap combines with the score filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConceptCap {
    /// Only the first `n` concepts are considered; low scorers among them are dropped.
    BeforeScoreFilter(usize),
    /// All concepts are score-filtered, then the first `n` survivors are shown.
    AfterScoreFilter(usize),
}

/// Display caps and wording for one rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProfile {
    /// Maximum author names shown; `None` shows all.
    pub author_cap: Option<usize>,
    pub author_overflow: OverflowWording,
    pub concept_cap: ConceptCap,
    pub keyword_cap: usize,
    /// Maximum research areas shown for an author.
    pub research_area_cap: usize,
}

impl FormatProfile {
    /// Compact profile for numbered search results.
    #[must_use]
    pub const fn list() -> Self {
        Self {
            author_cap: Some(3),
            author_overflow: OverflowWording::Others,
            concept_cap: ConceptCap::BeforeScoreFilter(3),
            keyword_cap: 3,
            research_area_cap: 5,
        }
    }

    /// Full profile for a single-record lookup.
    #[must_use]
    pub const fn detail() -> Self {
        Self {
            author_cap: None,
            author_overflow: OverflowWording::More,
            concept_cap: ConceptCap::AfterScoreFilter(10),
            keyword_cap: 10,
            research_area_cap: 10,
        }
    }
}
