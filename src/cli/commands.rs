//! CLI commands and argument parsing

use crate::pagination::DEFAULT_LIMIT;
use crate::search::SearchFilters;
use crate::types::{SortField, SortOrder};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hypothesis web annotation CLI
#[derive(Parser, Debug)]
#[command(name = "hypothesis")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one annotation
    Get {
        /// Annotation id
        id: String,

        /// Fetch without credentials (public annotations only)
        #[arg(long)]
        public: bool,
    },

    /// Search annotations, following pages until exhausted
    Search {
        #[command(flatten)]
        filters: SearchArgs,

        /// Stop after this many annotations
        #[arg(long)]
        max: Option<usize>,
    },

    /// Create an annotation
    Create {
        /// Document URI
        #[arg(long)]
        uri: String,

        /// Annotation text
        #[arg(long)]
        text: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Group id (defaults to the public group)
        #[arg(long)]
        group: Option<String>,

        /// Highlight this exact text on the page
        #[arg(long)]
        quote: Option<String>,
    },

    /// Update an annotation's text or tags
    Update {
        /// Annotation id
        id: String,

        /// New text
        #[arg(long)]
        text: Option<String>,

        /// Replacement tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete an annotation
    Delete {
        /// Annotation id
        id: String,
    },

    /// List groups
    Groups {
        /// Only groups usable on this document
        #[arg(long)]
        document_uri: Option<String>,

        /// Authority domain
        #[arg(long)]
        authority: Option<String>,
    },

    /// Create a private group
    CreateGroup {
        /// Group name
        name: String,

        /// Group description
        #[arg(long)]
        description: Option<String>,
    },

    /// List members of a group
    Members {
        /// Group id
        group: String,
    },

    /// Show the authenticated user's profile
    Profile,

    /// Export search results to files
    Export {
        #[command(flatten)]
        filters: SearchArgs,

        /// JSON output file
        #[arg(long)]
        json: Option<PathBuf>,

        /// CSV output file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Stop after this many annotations
        #[arg(long)]
        max: Option<usize>,
    },

    /// Show statistics for search results
    Stats {
        #[command(flatten)]
        filters: SearchArgs,

        /// Stop after this many annotations
        #[arg(long)]
        max: Option<usize>,
    },
}

/// Search filters shared by `search`, `export` and `stats`
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Username or `acct:` id
    #[arg(long)]
    pub user: Option<String>,

    /// Document URI
    #[arg(long)]
    pub uri: Option<String>,

    /// URI pattern with `*` and `?` wildcards
    #[arg(long)]
    pub wildcard_uri: Option<String>,

    /// Full-text search in the annotation body
    #[arg(long)]
    pub text: Option<String>,

    /// Search across all fields
    #[arg(long)]
    pub any: Option<String>,

    /// Tag (repeatable; all must match)
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Group id
    #[arg(long)]
    pub group: Option<String>,

    /// Search in quoted text
    #[arg(long)]
    pub quote: Option<String>,

    /// Replies to this annotation id
    #[arg(long)]
    pub references: Option<String>,

    /// Sort field
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort order
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Page size (clamped to 1..=200)
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Starting offset
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

impl SearchArgs {
    /// Build search filters from the arguments
    pub fn to_filters(&self) -> SearchFilters {
        let mut filters = SearchFilters::new().tags(self.tags.iter().cloned());
        if let Some(user) = &self.user {
            filters = filters.user(user.clone());
        }
        if let Some(uri) = &self.uri {
            filters = filters.uri(uri.clone());
        }
        if let Some(pattern) = &self.wildcard_uri {
            filters = filters.wildcard_uri(pattern.clone());
        }
        if let Some(text) = &self.text {
            filters = filters.text(text.clone());
        }
        if let Some(any) = &self.any {
            filters = filters.any(any.clone());
        }
        if let Some(group) = &self.group {
            filters = filters.group(group.clone());
        }
        if let Some(quote) = &self.quote {
            filters = filters.quote(quote.clone());
        }
        if let Some(id) = &self.references {
            filters = filters.references(id.clone());
        }
        if let Some(sort) = self.sort {
            filters = filters.sort(sort);
        }
        if let Some(order) = self.order {
            filters = filters.order(order);
        }
        filters
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "hypothesis",
            "--format",
            "pretty",
            "search",
            "--user",
            "alice",
            "--tag",
            "rust",
            "--tag",
            "notes",
            "--sort",
            "created",
            "--order",
            "desc",
            "--limit",
            "50",
            "--max",
            "10",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        let Commands::Search { filters, max } = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(max, Some(10));
        assert_eq!(filters.limit, 50);
        assert_eq!(filters.offset, 0);

        let expected = SearchFilters::new()
            .user("alice")
            .tag("rust")
            .tag("notes")
            .sort(SortField::Created)
            .order(SortOrder::Desc);
        assert_eq!(filters.to_filters(), expected);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "hypothesis",
            "profile",
            "--api-url",
            "http://localhost:5000/api",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:5000/api"));
        assert!(matches!(cli.command, Commands::Profile));
    }

    #[test]
    fn test_parse_rejects_unknown_sort() {
        let result = Cli::try_parse_from(["hypothesis", "search", "--sort", "color"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_search_args() {
        let cli = Cli::try_parse_from(["hypothesis", "stats"]).unwrap();
        let Commands::Stats { filters, max } = cli.command else {
            panic!("expected stats command");
        };
        assert_eq!(filters.limit, 200);
        assert!(max.is_none());
        assert!(filters.to_filters().is_empty());
    }
}
