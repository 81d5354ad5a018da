use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use pep440_rs::Version;
use regex::Regex;
use serde::Deserialize;

pub const DEFAULT_INDEX_URL: &str = "https://pypi.org/simple/";

/// Media type for the PEP 691 JSON rendering of the Simple API.
const SIMPLE_JSON_MEDIA_TYPE: &str = "application/vnd.pypi.simple.v1+json";

/// Client for querying a PEP 503/691 package index (PyPI, Nexus,
/// Artifactory, DevPI, ...).
pub struct SimpleIndexClient {
    client: reqwest::Client,
    index_url: String,
    include_yanked: bool,
}

/// One file entry on a project page.
#[derive(Debug, Deserialize)]
struct ProjectFile {
    filename: String,
    /// PEP 592: either a boolean or a reason string.
    #[serde(default)]
    yanked: Yanked,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Yanked {
    Flag(bool),
    Reason(String),
}

impl Default for Yanked {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl Yanked {
    fn is_yanked(&self) -> bool {
        matches!(self, Self::Flag(true) | Self::Reason(_))
    }
}

#[derive(Debug, Deserialize)]
struct ProjectPage {
    files: Vec<ProjectFile>,
}

impl SimpleIndexClient {
    pub fn new(include_yanked: bool) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(concat!("reqs/", env!("CARGO_PKG_VERSION")))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            index_url: DEFAULT_INDEX_URL.to_string(),
            include_yanked,
        }
    }

    /// Use a custom index (e.g. a private Nexus repository).
    pub fn with_index_url(mut self, url: &str) -> Self {
        self.index_url = format!("{}/", url.trim_end_matches('/'));
        self
    }

    /// Fetch the available versions of a package, newest first.
    pub async fn fetch_versions(&self, name: &str) -> Result<Vec<Version>> {
        let url = format!("{}{}/", self.index_url, normalize_project_name(name));

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, SIMPLE_JSON_MEDIA_TYPE)
            .send()
            .await
            .with_context(|| format!("Failed to query index for '{name}'"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(anyhow!("Package '{name}' not found"));
        }
        if !response.status().is_success() {
            return Err(anyhow!(
                "Index request for '{name}' failed with status: {}",
                response.status()
            ));
        }

        let page: ProjectPage = response
            .json()
            .await
            .with_context(|| format!("Failed to parse index response for '{name}'"))?;

        let extractor = VersionExtractor::new(name);
        let mut versions: Vec<Version> = page
            .files
            .iter()
            .filter(|file| self.include_yanked || !file.yanked.is_yanked())
            .filter_map(|file| extractor.version_of(&file.filename))
            .collect();

        versions.sort();
        versions.dedup();
        versions.reverse();
        Ok(versions)
    }
}

/// PEP 503 name normalization: runs of `-`, `_`, `.` collapse to a single
/// `-`, lower-cased.
fn normalize_project_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut previous_was_separator = false;
    for ch in name.to_lowercase().chars() {
        if matches!(ch, '-' | '_' | '.') {
            if !previous_was_separator {
                normalized.push('-');
            }
            previous_was_separator = true;
        } else {
            normalized.push(ch);
            previous_was_separator = false;
        }
    }
    normalized
}

/// Extracts version strings from wheel and sdist filenames for one package.
struct VersionExtractor {
    wheel: Option<Regex>,
    sdist: Option<Regex>,
}

impl VersionExtractor {
    fn new(package_name: &str) -> Self {
        // The filename may use any separator variant of the name.
        let name_pattern = normalize_project_name(package_name)
            .split('-')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("[-_.]+");

        Self {
            // {name}-{version}(-{build})?-{python}-{abi}-{platform}.whl
            wheel: Regex::new(&format!(r"^{name_pattern}[-_](.+?)-(?:py|cp)\d")).ok(),
            // {name}-{version}.tar.gz
            sdist: Regex::new(&format!(r"^{name_pattern}[-_](.+?)\.tar\.gz$")).ok(),
        }
    }

    fn version_of(&self, filename: &str) -> Option<Version> {
        let filename = filename.to_lowercase();
        let raw = [&self.wheel, &self.sdist].into_iter().find_map(|pattern| {
            pattern
                .as_ref()
                .and_then(|re| re.captures(&filename))
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string())
        })?;
        // Legacy version formats on old uploads are skipped.
        Version::from_str(&raw).ok()
    }
}
