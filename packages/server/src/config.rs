use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::domains::jobs::metadata::{DefaultImages, MetadataContext};

const DEFAULT_SITE_URL: &str = "https://www.jobvacancy.com";
const DEFAULT_SITE_NAME: &str = "Job Vacancy Hub";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string; the server falls back to an in-memory
    /// store when unset
    pub database_url: Option<String>,
    pub port: u16,
    pub site_url: String,
    pub site_name: String,
    pub default_og_image: String,
    pub default_twitter_image: String,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let site_url = lookup("SITE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            site_name: lookup("SITE_NAME").unwrap_or_else(|| DEFAULT_SITE_NAME.to_string()),
            default_og_image: lookup("DEFAULT_OG_IMAGE")
                .unwrap_or_else(|| format!("{}/images/job-finder-og.png", site_url)),
            default_twitter_image: lookup("DEFAULT_TWITTER_IMAGE")
                .unwrap_or_else(|| format!("{}/images/job-finder-twitter.png", site_url)),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            site_url,
        })
    }

    /// Site inputs for metadata, sitemap and robots.txt.
    pub fn metadata_context(&self) -> MetadataContext {
        MetadataContext {
            canonical_base_url: self.site_url.clone(),
            site_name: self.site_name.clone(),
            site_url: format!("{}/", self.site_url),
            default_images: DefaultImages {
                og: self.default_og_image.clone(),
                twitter: self.default_twitter_image.clone(),
            },
        }
    }
}
