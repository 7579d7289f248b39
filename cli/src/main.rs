//! `nyt` - query the NYT Article Search and TimesTags APIs from a shell.
//!
//! Responses are printed as pretty JSON on stdout; logs go to stderr.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use nytimes_core::{
    config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL},
    ApiConfig, BlockingClient, FacetField, ListTagsRequest, ListTagsResponse,
    SearchArticlesRequest, Sort, TagType,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nyt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search New York Times articles and tag suggestions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API key
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: String,

    /// API base URL
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search articles
    Search(SearchArgs),

    /// Suggest tags
    Tags(TagsArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query
    #[arg(short, long, default_value = "")]
    query: String,

    /// Lucene filter query
    #[arg(long, default_value = "")]
    fq: String,

    /// First publication date (YYYYMMDD)
    #[arg(long, value_parser = parse_date)]
    begin: Option<NaiveDate>,

    /// Last publication date (YYYYMMDD)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Facet fields to aggregate over (enables faceting)
    #[arg(long = "facet", value_delimiter = ',')]
    facets: Vec<FacetField>,

    /// Apply the filter query to facet counts
    #[arg(long)]
    facet_filter: bool,

    /// Fields to return
    #[arg(long = "field", value_delimiter = ',')]
    fields: Vec<String>,

    /// newest, oldest or relevance
    #[arg(long)]
    sort: Option<Sort>,

    #[arg(long, default_value_t = 0)]
    page: u32,
}

impl SearchArgs {
    fn into_request(self) -> SearchArticlesRequest {
        SearchArticlesRequest {
            begin_date: self.begin,
            end_date: self.end,
            facet: !self.facets.is_empty(),
            facet_fields: self.facets,
            facet_filter: self.facet_filter,
            field_list: self.fields,
            filter_query: self.fq,
            page: self.page,
            query: self.query,
            sort: self.sort,
        }
    }
}

#[derive(Args)]
struct TagsArgs {
    query: String,

    /// Des, Geo, Org, Per or Ttl
    #[arg(short, long)]
    filter: Option<TagType>,

    #[arg(short, long)]
    max: Option<u32>,

    /// Print person tags as first/last names
    #[arg(long)]
    person: bool,
}

impl TagsArgs {
    fn request(&self) -> ListTagsRequest {
        ListTagsRequest {
            query: self.query.clone(),
            filter: self.filter,
            max: self.max,
        }
    }
}

fn render_tags(response: &ListTagsResponse, person: bool) -> Result<String> {
    let rendered = if person {
        serde_json::to_string_pretty(&response.people())?
    } else {
        serde_json::to_string_pretty(&response.tags)?
    };
    Ok(rendered)
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|e| format!("expected YYYYMMDD: {e}"))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(base_url = %cli.base_url, timeout_secs = cli.timeout, "client configured");

    let config = ApiConfig::new(cli.api_key)
        .with_base_url(&cli.base_url)
        .with_timeout(Duration::from_secs(cli.timeout));
    let client = BlockingClient::new(config);

    let output = match cli.command {
        Commands::Search(args) => {
            let response = client
                .search_articles(&args.into_request())
                .context("article search failed")?;
            serde_json::to_string_pretty(&response)?
        }
        Commands::Tags(args) => {
            let response = client
                .list_tags(&args.request())
                .context("tag suggest failed")?;
            render_tags(&response, args.person)?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nytimes_core::Tag;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("nyt").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn search_flags_map_onto_request() {
        let cli = parse(&[
            "--api-key", "k", "search", "-q", "cork", "--begin", "20181201", "--facet",
            "day_of_week,source", "--field", "headline", "--sort", "newest", "--page", "2",
        ]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        let request = args.into_request();
        assert_eq!(request.query, "cork");
        assert_eq!(request.begin_date, NaiveDate::from_ymd_opt(2018, 12, 1));
        assert_eq!(request.end_date, None);
        assert!(request.facet);
        assert_eq!(
            request.facet_fields,
            vec![FacetField::DayOfWeek, FacetField::Source]
        );
        assert_eq!(request.field_list, vec!["headline".to_string()]);
        assert_eq!(request.sort, Some(Sort::Newest));
        assert_eq!(request.page, 2);
    }

    #[test]
    fn search_without_facets_disables_faceting() {
        let cli = parse(&["--api-key", "k", "search"]);
        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.into_request(), SearchArticlesRequest::default());
    }

    #[test]
    fn bad_date_is_rejected() {
        let result = Cli::try_parse_from(["nyt", "--api-key", "k", "search", "--begin", "2018-12-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn tags_flags_map_onto_request() {
        let cli = parse(&["--api-key", "k", "tags", "doe", "-f", "per", "-m", "5", "--person"]);
        let Commands::Tags(args) = cli.command else {
            panic!("expected tags");
        };
        assert!(args.person);
        assert_eq!(
            args.request(),
            ListTagsRequest::new("doe").with_filter(TagType::Person).with_max(5)
        );
    }

    #[test]
    fn person_output_lists_name_parts_only_for_people() {
        let response = ListTagsResponse {
            tags: vec![
                Tag {
                    tag_type: TagType::Person,
                    value: "Doe, Jane".to_string(),
                },
                Tag {
                    tag_type: TagType::GeographicLocation,
                    value: "Cork".to_string(),
                },
            ],
        };

        let people: serde_json::Value =
            serde_json::from_str(&render_tags(&response, true).unwrap()).unwrap();
        assert_eq!(
            people,
            serde_json::json!([{"first_names": "Jane", "last_name": "Doe"}])
        );

        let tags: serde_json::Value =
            serde_json::from_str(&render_tags(&response, false).unwrap()).unwrap();
        assert_eq!(tags[1], serde_json::json!({"type": "Geo", "value": "Cork"}));
    }
}
