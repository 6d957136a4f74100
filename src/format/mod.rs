//! Rendering of OpenAlex work and author records into agent-readable text.
//!
//! Every renderer is a pure function over a borrowed JSON record and a
//! [`FormatProfile`]. Field access goes through [`Record`], so absent or null
//! substructures degrade to the placeholders in [`placeholder`] instead of
//! failing.

mod profile;

pub use profile::{CONCEPT_SCORE_THRESHOLD, ConceptCap, FormatProfile, OverflowWording};

use std::fmt::Write as _;

use serde_json::Value;

use crate::abstract_text::reconstruct_abstract;
use crate::record::{Record, extract_id};

/// Fixed placeholder text for missing fields and empty result sets.
pub mod placeholder {
    pub const NO_TITLE: &str = "No title";
    pub const UNKNOWN_AUTHOR: &str = "Unknown";
    pub const NO_AUTHORS: &str = "No authors available";
    pub const UNKNOWN_VENUE: &str = "Unknown venue";
    pub const UNKNOWN_DATE: &str = "Unknown date";
    pub const NO_DOI: &str = "No DOI";
    pub const NO_ABSTRACT: &str = "No abstract available";
    pub const NO_CONCEPTS: &str = "No concepts available";
    pub const NO_KEYWORDS: &str = "No keywords available";
    pub const NO_NAME: &str = "No name";
    pub const UNKNOWN_INSTITUTION: &str = "Unknown institution";
    pub const UNKNOWN_COUNTRY: &str = "Unknown country";
    pub const NO_RESEARCH_AREAS: &str = "No research areas available";
    pub const NO_WORKS_FOUND: &str = "No works found matching your search criteria.";
    pub const NO_AUTHORS_FOUND: &str = "No authors found matching your search criteria.";
}

use placeholder::{
    NO_ABSTRACT, NO_AUTHORS, NO_AUTHORS_FOUND, NO_CONCEPTS, NO_DOI, NO_KEYWORDS, NO_NAME,
    NO_RESEARCH_AREAS, NO_TITLE, NO_WORKS_FOUND, UNKNOWN_AUTHOR, UNKNOWN_COUNTRY, UNKNOWN_DATE,
    UNKNOWN_INSTITUTION, UNKNOWN_VENUE,
};

fn join_or(names: &[&str], fallback: &str) -> String {
    if names.is_empty() {
        fallback.to_string()
    } else {
        names.join(", ")
    }
}

/// Author display names, capped per profile with the profile's overflow suffix.
#[must_use]
pub fn author_names(work: Record<'_>, profile: &FormatProfile) -> String {
    let authorships = work.list("authorships");
    if authorships.is_empty() {
        return NO_AUTHORS.to_string();
    }

    let shown = profile
        .author_cap
        .map_or(authorships.len(), |cap| cap.min(authorships.len()));
    let names: Vec<&str> = authorships[..shown]
        .iter()
        .map(|authorship| {
            Record::new(authorship)
                .field("author")
                .text_or("display_name", UNKNOWN_AUTHOR)
        })
        .collect();

    let mut rendered = names.join(", ");
    let hidden = authorships.len() - shown;
    if hidden > 0 {
        rendered.push_str(&profile.author_overflow.suffix(hidden));
    }
    rendered
}

/// Venue name with its source type in parentheses when known.
#[must_use]
pub fn venue(work: Record<'_>) -> String {
    let source = work.field("primary_location").field("source");
    let name = source.text_or("display_name", UNKNOWN_VENUE);
    match source.text("type").filter(|kind| !kind.is_empty()) {
        Some(kind) => format!("{name} ({kind})"),
        None => name.to_string(),
    }
}

/// Concepts scoring above [`CONCEPT_SCORE_THRESHOLD`], capped per profile.
///
/// A concept without a name still occupies its place as an empty entry.
#[must_use]
pub fn concept_names(work: Record<'_>, profile: &FormatProfile) -> String {
    let concepts = work.list("concepts");
    let (considered, shown) = match profile.concept_cap {
        ConceptCap::BeforeScoreFilter(cap) => (&concepts[..cap.min(concepts.len())], usize::MAX),
        ConceptCap::AfterScoreFilter(cap) => (concepts, cap),
    };
    let names: Vec<&str> = considered
        .iter()
        .map(Record::new)
        .filter(|concept| concept.score("score") > CONCEPT_SCORE_THRESHOLD)
        .map(|concept| concept.text_or("display_name", ""))
        .take(shown)
        .collect();
    join_or(&names, NO_CONCEPTS)
}

/// Keywords in service order, capped per profile. Not score-filtered.
#[must_use]
pub fn keyword_names(work: Record<'_>, profile: &FormatProfile) -> String {
    let names: Vec<&str> = work
        .list("keywords")
        .iter()
        .take(profile.keyword_cap)
        .map(|keyword| Record::new(keyword).text_or("display_name", ""))
        .collect();
    join_or(&names, NO_KEYWORDS)
}

/// Reconstructed abstract, or the placeholder when there is none.
#[must_use]
pub fn work_abstract(work: Record<'_>) -> String {
    let text = reconstruct_abstract(work.raw("abstract_inverted_index"));
    if text.is_empty() {
        NO_ABSTRACT.to_string()
    } else {
        text
    }
}

/// Name and country of an author's most recent institution.
///
/// `last_known_institutions` may be a list (first entry wins) or a single
/// object; the legacy `last_known_institution` field is consulted when the
/// plural field yields nothing.
#[must_use]
pub fn institution(author: Record<'_>) -> (&str, &str) {
    let mut institution = author.first_or_self("last_known_institutions");
    if institution.is_empty() {
        institution = author.first_or_self("last_known_institution");
    }
    (
        institution.text_or("display_name", UNKNOWN_INSTITUTION),
        institution.text_or("country_code", UNKNOWN_COUNTRY),
    )
}

/// Research areas for an author from `x_concepts`, falling back to `topics`.
#[must_use]
pub fn research_areas(author: Record<'_>, profile: &FormatProfile) -> String {
    let mut areas = display_names(author.list("x_concepts"), profile.research_area_cap);
    if areas.is_empty() {
        areas = display_names(author.list("topics"), profile.research_area_cap);
    }
    join_or(&areas, NO_RESEARCH_AREAS)
}

/// Non-empty names among the first `cap` items.
fn display_names(items: &[Value], cap: usize) -> Vec<&str> {
    items
        .iter()
        .take(cap)
        .map(Record::new)
        .filter_map(|item| item.text("display_name").filter(|name| !name.is_empty()))
        .collect()
}

/// Renders one numbered work entry for a search result list.
#[must_use]
pub fn format_work_entry(position: usize, work: &Value, profile: &FormatProfile) -> String {
    let work = Record::new(work);
    let mut out = String::new();
    let _ = writeln!(out, "{position}. **{}**", work.text_or("title", NO_TITLE));
    let _ = writeln!(out, "   Authors: {}", author_names(work, profile));
    let _ = writeln!(out, "   Venue: {}", venue(work));
    let _ = writeln!(out, "   Published: {}", work.text_or("publication_date", UNKNOWN_DATE));
    let _ = writeln!(out, "   Citations: {}", work.count("cited_by_count"));
    let _ = writeln!(out, "   DOI: {}", work.text_or("doi", NO_DOI));
    let _ = writeln!(out, "   OpenAlex ID: {}", extract_id(work.text_or("id", "")));
    let _ = writeln!(out, "   Concepts: {}", concept_names(work, profile));
    let _ = writeln!(out, "   Keywords: {}", keyword_names(work, profile));
    let _ = writeln!(out, "   Abstract: {}", work_abstract(work));
    out.push('\n');
    out
}

/// Renders a works search result page.
///
/// `limit` is the effective page size that was requested.
#[must_use]
pub fn format_works_list(works: &[Value], limit: u32) -> String {
    if works.is_empty() {
        return NO_WORKS_FOUND.to_string();
    }
    let profile = FormatProfile::list();
    let mut out = format!("Found {} works (showing up to {limit}):\n\n", works.len());
    for (index, work) in works.iter().enumerate() {
        out.push_str(&format_work_entry(index + 1, work, &profile));
    }
    out
}

/// Renders the detailed view of a single work.
#[must_use]
pub fn format_work_detail(work: &Value) -> String {
    let profile = FormatProfile::detail();
    let work = Record::new(work);
    let mut out = String::new();
    let _ = write!(out, "**{}**\n\n", work.text_or("title", NO_TITLE));
    let _ = write!(out, "**Authors:** {}\n\n", author_names(work, &profile));
    let _ = writeln!(out, "**Venue:** {}", venue(work));
    let _ = writeln!(out, "**Published:** {}", work.text_or("publication_date", UNKNOWN_DATE));
    let _ = writeln!(out, "**Citations:** {}", work.count("cited_by_count"));
    let _ = writeln!(out, "**DOI:** {}", work.text_or("doi", NO_DOI));
    let _ = write!(out, "**OpenAlex ID:** {}\n\n", extract_id(work.text_or("id", "")));
    let _ = write!(out, "**Concepts:** {}\n\n", concept_names(work, &profile));
    let _ = write!(out, "**Keywords:** {}\n\n", keyword_names(work, &profile));
    let _ = writeln!(out, "**Abstract:** {}", work_abstract(work));
    out
}

/// Renders one numbered author entry for a search result list.
#[must_use]
pub fn format_author_entry(position: usize, author: &Value, profile: &FormatProfile) -> String {
    let author = Record::new(author);
    let stats = author.field("summary_stats");
    let (institution_name, country) = institution(author);
    let relevance = author.score("relevance_score");

    let mut out = String::new();
    let _ = writeln!(out, "{position}. **{}**", author.text_or("display_name", NO_NAME));
    let _ = writeln!(out, "   Institution: {institution_name} ({country})");
    let _ = writeln!(out, "   Works: {}", author.count("works_count"));
    let _ = writeln!(out, "   Citations: {}", author.count("cited_by_count"));
    let _ = writeln!(out, "   h-index: {}", stats.count("h_index"));
    let _ = writeln!(out, "   i10-index: {}", stats.count("i10_index"));
    if relevance > 0.0 {
        let _ = writeln!(out, "   Relevance Score: {relevance:.3}");
    }
    let _ = writeln!(out, "   Research Areas: {}", research_areas(author, profile));
    let _ = write!(out, "   OpenAlex ID: {}\n\n", extract_id(author.text_or("id", "")));
    out
}

/// Renders an authors search result page.
#[must_use]
pub fn format_authors_list(authors: &[Value], limit: u32) -> String {
    if authors.is_empty() {
        return NO_AUTHORS_FOUND.to_string();
    }
    let profile = FormatProfile::list();
    let mut out = format!("Found {} authors (showing up to {limit}):\n\n", authors.len());
    for (index, author) in authors.iter().enumerate() {
        out.push_str(&format_author_entry(index + 1, author, &profile));
    }
    out
}
