//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use openalex_tools::query::DEFAULT_RESULT_LIMIT;
use openalex_tools::{AuthorSort, AuthorsSearchRequest, WorkSort, WorksSearchRequest};

/// Search the OpenAlex scholarly catalogue from the command line.
///
/// Results are printed as plain text, ready to paste into notes or feed to
/// an agent.
#[derive(Parser, Debug)]
#[command(name = "openalex-tools")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (defaults to $XDG_CONFIG_HOME/openalex-tools/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the OpenAlex API base URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Contact email for the OpenAlex polite pool
    #[arg(long, global = true, value_name = "ADDR")]
    pub email: Option<String>,

    /// Home institution OpenAlex ID used by --institution-only
    #[arg(long, global = true, value_name = "ID")]
    pub institution_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search works by text and/or filters
    Works(WorksArgs),
    /// Show one work by OpenAlex ID or DOI
    Work(WorkArgs),
    /// Search authors by name or topic
    Authors(AuthorsArgs),
}

#[derive(ClapArgs, Debug)]
pub struct WorksArgs {
    /// Free-text search query
    #[arg(default_value = "")]
    pub query: String,

    /// Number of results (clamped to 1-200)
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Sort order, e.g. cited_by_count:desc
    #[arg(short, long, default_value_t = WorkSort::Relevance)]
    pub sort: WorkSort,

    /// Work type, e.g. article, book, dataset
    #[arg(long = "type", value_name = "TYPE")]
    pub work_type: Option<String>,

    /// Publication year or range, e.g. 2020 or 2020-2024
    #[arg(long)]
    pub year: Option<String>,

    /// Restrict to works by this OpenAlex author ID
    #[arg(long)]
    pub author_id: Option<String>,

    /// Restrict to works from the configured home institution
    #[arg(long)]
    pub institution_only: bool,
}

impl WorksArgs {
    #[must_use]
    pub fn into_request(self, contact_email: Option<String>) -> WorksSearchRequest {
        WorksSearchRequest {
            query: self.query,
            limit: self.limit,
            sort: self.sort,
            work_type: self.work_type,
            year: self.year,
            author_id: self.author_id,
            institution_only: self.institution_only,
            contact_email,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct WorkArgs {
    /// OpenAlex work ID (W2741809807) or DOI (10.7717/peerj.4375)
    pub work_id: String,
}

#[derive(ClapArgs, Debug)]
pub struct AuthorsArgs {
    /// Author name or research topic
    #[arg(default_value = "")]
    pub query: String,

    /// Number of results (clamped to 1-200)
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,

    /// Sort order, e.g. summary_stats.h_index:desc
    #[arg(short, long, default_value_t = AuthorSort::Relevance)]
    pub sort: AuthorSort,

    /// Restrict to authors last seen at this OpenAlex institution ID
    #[arg(long)]
    pub institution: Option<String>,

    /// Restrict to authors last seen at the configured home institution
    #[arg(long)]
    pub institution_only: bool,

    /// Two-letter country code of the author's last known institution
    #[arg(long)]
    pub country: Option<String>,
}

impl AuthorsArgs {
    #[must_use]
    pub fn into_request(self, contact_email: Option<String>) -> AuthorsSearchRequest {
        AuthorsSearchRequest {
            query: self.query,
            limit: self.limit,
            sort: self.sort,
            institution_id: self.institution,
            institution_only: self.institution_only,
            country: self.country,
            contact_email,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_works_defaults() {
        let args = Args::try_parse_from(["openalex-tools", "works", "soil carbon"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        let Command::Works(works) = args.command else {
            panic!("expected works subcommand");
        };
        assert_eq!(works.query, "soil carbon");
        assert_eq!(works.limit, 10);
        assert_eq!(works.sort, WorkSort::Relevance);
        assert!(!works.institution_only);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["openalex-tools", "-vv", "works", "x"]).unwrap();
        assert_eq!(args.verbose, 2);

        let args = Args::try_parse_from(["openalex-tools", "works", "x", "--verbose"]).unwrap();
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_cli_works_filters_map_to_request() {
        let args = Args::try_parse_from([
            "openalex-tools",
            "--email",
            "lab@example.org",
            "works",
            "--type",
            "article",
            "--year",
            "2020-2024",
            "--sort",
            "cited_by_count:desc",
            "-n",
            "25",
            "--institution-only",
        ])
        .unwrap();
        let email = args.email.clone();
        let Command::Works(works) = args.command else {
            panic!("expected works subcommand");
        };
        let request = works.into_request(email);
        assert_eq!(request.query, "");
        assert_eq!(request.work_type.as_deref(), Some("article"));
        assert_eq!(request.year.as_deref(), Some("2020-2024"));
        assert_eq!(request.sort, WorkSort::CitedByCountDesc);
        assert_eq!(request.limit, 25);
        assert!(request.institution_only);
        assert_eq!(request.contact_email.as_deref(), Some("lab@example.org"));
    }

    #[test]
    fn test_cli_negative_limit_is_accepted_for_clamping() {
        let args = Args::try_parse_from(["openalex-tools", "works", "x", "--limit", "-5"]).unwrap();
        let Command::Works(works) = args.command else {
            panic!("expected works subcommand");
        };
        assert_eq!(works.limit, -5);
    }

    #[test]
    fn test_cli_unknown_sort_rejected() {
        let err = Args::try_parse_from(["openalex-tools", "works", "x", "--sort", "title:asc"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_work_requires_id() {
        let err = Args::try_parse_from(["openalex-tools", "work"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        let args = Args::try_parse_from(["openalex-tools", "work", "10.7717/peerj.4375"]).unwrap();
        let Command::Work(work) = args.command else {
            panic!("expected work subcommand");
        };
        assert_eq!(work.work_id, "10.7717/peerj.4375");
    }

    #[test]
    fn test_cli_authors_filters_map_to_request() {
        let args = Args::try_parse_from([
            "openalex-tools",
            "authors",
            "hydrology",
            "--institution",
            "I1",
            "--country",
            "us",
            "--sort",
            "summary_stats.h_index:desc",
        ])
        .unwrap();
        let Command::Authors(authors) = args.command else {
            panic!("expected authors subcommand");
        };
        let request = authors.into_request(None);
        assert_eq!(request.institution_id.as_deref(), Some("I1"));
        assert_eq!(request.country.as_deref(), Some("us"));
        assert_eq!(request.sort, AuthorSort::HIndexDesc);
    }

    #[test]
    fn test_cli_subcommand_required() {
        let err = Args::try_parse_from(["openalex-tools"]).unwrap_err();
        assert!(matches!(
            err.kind(),
            clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                | clap::error::ErrorKind::MissingSubcommand
        ));
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Args::try_parse_from(["openalex-tools", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
