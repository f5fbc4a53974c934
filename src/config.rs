// src/config.rs
//! Command-line input and environment-driven service configuration.

use crate::constants::{
    DEFAULT_AUTHOR_RELATION_PROPERTY, DEFAULT_RATE_LIMIT_PER_MIN, GOOGLE_BOOKS_URL,
    NOTION_API_BASE_URL,
};
use crate::error::AppError;
use crate::types::{
    DatabaseId, NotionToken, PropertyName, SharedSecret, ValidatedUrl, ValidationError,
};
use clap::Parser;
use std::collections::HashMap;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Address the HTTP server listens on
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub bind: SocketAddr,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Everything the service reads from its environment, validated.
///
/// Optional settings stay optional here: a missing Notion token disables
/// `/add`, a missing `API_KEY` leaves the guarded routes open.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub notion_token: Option<NotionToken>,
    pub database: Option<DatabaseId>,
    pub author_database: Option<DatabaseId>,
    pub author_title_property: Option<PropertyName>,
    pub author_relation_property: PropertyName,
    pub api_key: Option<SharedSecret>,
    pub rate_limit_per_min: i64,
    pub notion_base_url: ValidatedUrl,
    pub catalog_url: ValidatedUrl,
    pub catalog_api_key: Option<String>,
}

impl ServiceConfig {
    /// Reads the process environment; the bind address comes from the command line.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let mut config = Self::from_vars(&vars)?;
        config.bind = cli.bind;
        Ok(config)
    }

    /// Builds the configuration from an explicit variable map. Blank values count as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, AppError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let bind = match get("BIND_ADDR") {
            Some(raw) => parse_setting("BIND_ADDR", &raw)?,
            None => parse_setting("BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };

        let notion_token = get("NOTION_TOKEN").map(NotionToken::new).transpose()?;
        let database = get("NOTION_DATABASE_ID")
            .map(|raw| DatabaseId::parse(&raw))
            .transpose()?;
        let author_database = get("NOTION_AUTHOR_DB_ID")
            .map(|raw| DatabaseId::parse(&raw))
            .transpose()?;

        let rate_limit_per_min = match get("RATE_LIMIT_PER_MIN") {
            Some(raw) => parse_setting("RATE_LIMIT_PER_MIN", &raw)?,
            None => DEFAULT_RATE_LIMIT_PER_MIN,
        };

        let notion_base_url = ValidatedUrl::parse(
            &get("NOTION_API_BASE_URL").unwrap_or_else(|| NOTION_API_BASE_URL.to_string()),
        )?;
        let catalog_url = ValidatedUrl::parse(
            &get("GOOGLE_BOOKS_API_URL").unwrap_or_else(|| GOOGLE_BOOKS_URL.to_string()),
        )?;

        Ok(Self {
            bind,
            notion_token,
            database,
            author_database,
            author_title_property: get("NOTION_AUTHOR_TITLE_PROPERTY").map(PropertyName::from),
            author_relation_property: get("NOTION_AUTHOR_RELATION_PROPERTY")
                .map(PropertyName::from)
                .unwrap_or_else(|| PropertyName::new(DEFAULT_AUTHOR_RELATION_PROPERTY)),
            api_key: get("API_KEY").and_then(SharedSecret::new),
            rate_limit_per_min,
            notion_base_url,
            catalog_url,
            catalog_api_key: get("GOOGLE_BOOKS_API_KEY"),
        })
    }

    /// Token and database id together, when both are present.
    pub fn notion_target(&self) -> Option<(&NotionToken, &DatabaseId)> {
        self.notion_token.as_ref().zip(self.database.as_ref())
    }
}

fn parse_setting<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, AppError> {
    raw.parse().map_err(|_| {
        AppError::from(ValidationError::InvalidSetting {
            name,
            value: raw.to_string(),
        })
    })
}
