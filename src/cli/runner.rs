//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, SearchArgs};
use crate::client::{GroupFilter, HypothesisClient, NewAnnotation};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::export::{export_csv, export_json, extract_username, truncate, CollectionStats};
use crate::types::{JsonValue, PUBLIC_GROUP};
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Map};
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;
use tracing::{info, warn};

/// Width of the text column in pretty search output
const TEXT_PREVIEW_LEN: usize = 60;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = self.client()?;

        match &self.cli.command {
            Commands::Get { id, public } => {
                let annotation = client.get_annotation(id, !public).await?;
                self.output(&annotation);
                Ok(())
            }
            Commands::Search { filters, max } => self.search(&client, filters, *max).await,
            Commands::Create {
                uri,
                text,
                tags,
                group,
                quote,
            } => {
                let mut draft = NewAnnotation::new(uri.clone());
                draft.text.clone_from(text);
                draft.tags.clone_from(tags);
                draft.group.clone_from(group);
                if let Some(quote) = quote {
                    draft = draft.quote(quote.clone());
                }
                let created = client.create(&draft).await?;
                info!("Created annotation {}", created["id"]);
                self.output(&created);
                Ok(())
            }
            Commands::Update { id, text, tags } => {
                let mut changes = Map::new();
                if let Some(text) = text {
                    changes.insert("text".to_string(), json!(text));
                }
                if !tags.is_empty() {
                    changes.insert("tags".to_string(), json!(tags));
                }
                if changes.is_empty() {
                    return Err(Error::invalid_argument(
                        "nothing to update; pass --text or --tag",
                    ));
                }
                let updated = client
                    .update_annotation(id, JsonValue::Object(changes))
                    .await?;
                self.output(&updated);
                Ok(())
            }
            Commands::Delete { id } => {
                let deleted = client.delete_annotation(id).await?;
                info!("Deleted annotation {id}");
                self.output(&deleted);
                Ok(())
            }
            Commands::Groups {
                document_uri,
                authority,
            } => {
                let mut filter = GroupFilter::new();
                filter.document_uri.clone_from(document_uri);
                filter.authority.clone_from(authority);
                let groups = client.groups(&filter).await?;
                self.output(&groups);
                Ok(())
            }
            Commands::CreateGroup { name, description } => {
                let group = client
                    .create_group(name, description.as_deref(), None)
                    .await?;
                self.output(&group);
                Ok(())
            }
            Commands::Members { group } => {
                let members = client.group_members(group).await?;
                self.output(&members);
                Ok(())
            }
            Commands::Profile => {
                let profile = client.profile().await?;
                self.output(&profile);
                Ok(())
            }
            Commands::Export {
                filters,
                json,
                csv,
                max,
            } => {
                if json.is_none() && csv.is_none() {
                    return Err(Error::invalid_argument(
                        "nothing to export; pass --json or --csv",
                    ));
                }

                let annotations = self.collect(&client, filters, *max).await?;
                if annotations
                    .iter()
                    .any(|a| a["group"].as_str().is_some_and(|g| g != PUBLIC_GROUP))
                {
                    warn!("Export includes annotations from private groups");
                }

                if let Some(path) = json {
                    export_json(&annotations, BufWriter::new(File::create(path)?))?;
                    info!("Exported {} annotations to {}", annotations.len(), path.display());
                }
                if let Some(path) = csv {
                    export_csv(&annotations, BufWriter::new(File::create(path)?))?;
                    info!("Exported {} annotations to {}", annotations.len(), path.display());
                }
                Ok(())
            }
            Commands::Stats { filters, max } => {
                let annotations = self.collect(&client, filters, *max).await?;
                let stats = CollectionStats::from_annotations(&annotations);
                match self.cli.format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string(&stats)?);
                    }
                    OutputFormat::Pretty => print!("{stats}"),
                }
                Ok(())
            }
        }
    }

    /// Build a client from the config file, environment and flags
    fn client(&self) -> Result<HypothesisClient> {
        let mut config = ClientConfig::load(self.cli.config.as_deref())?;
        if let Some(url) = &self.cli.api_url {
            config.api_url.clone_from(url);
        }
        HypothesisClient::from_config(&config)
    }

    /// Print search results as they arrive
    async fn search(
        &self,
        client: &HypothesisClient,
        args: &SearchArgs,
        max: Option<usize>,
    ) -> Result<()> {
        let start = Instant::now();
        let mut stream = client
            .search(args.to_filters(), args.limit, args.offset)
            .take(max.unwrap_or(usize::MAX));

        let mut count = 0usize;
        while let Some(annotation) = stream.try_next().await? {
            count += 1;
            match self.cli.format {
                OutputFormat::Json => self.output(&annotation),
                OutputFormat::Pretty => println!("{}", summary_line(&annotation)),
            }
        }

        info!(
            "Found {count} annotations in {:.2}s",
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Collect search results, up to `max`
    async fn collect(
        &self,
        client: &HypothesisClient,
        args: &SearchArgs,
        max: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        let annotations: Vec<JsonValue> = client
            .search(args.to_filters(), args.limit, args.offset)
            .take(max.unwrap_or(usize::MAX))
            .try_collect()
            .await?;
        info!("Fetched {} annotations", annotations.len());
        Ok(annotations)
    }

    fn output(&self, value: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(value).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
            }
        }
    }
}

/// One-line description of an annotation
fn summary_line(annotation: &JsonValue) -> String {
    let field = |key: &str| annotation.get(key).and_then(JsonValue::as_str);
    format!(
        "{}  {}  {}  {}",
        field("id").unwrap_or_default(),
        field("created").unwrap_or_default(),
        extract_username(field("user")),
        truncate(field("text"), TEXT_PREVIEW_LEN),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_line() {
        let line = summary_line(&json!({
            "id": "a1",
            "created": "2024-01-15T10:30:00Z",
            "user": "acct:alice@hypothes.is",
            "text": "hello\nworld",
        }));
        assert_eq!(line, "a1  2024-01-15T10:30:00Z  alice  hello world");

        let line = summary_line(&json!({"id": "a2"}));
        assert_eq!(line, "a2    (unknown)  (no text)");
    }
}
