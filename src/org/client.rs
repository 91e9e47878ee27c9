use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::tree::{TreeRow, TreeStats, build_forest, is_flat, render_rows};
use super::unit::{OrgUnit, OrgUnitId};
use crate::error::{AdminError, FetchError};
use crate::preferences::Language;
use crate::providers::http_client::{build_provider_client_with_timeout, join_url};
use crate::providers::scrub::api_error;

const SERVICE: &str = "organization service";

pub const TREE_PATH: &str = "/api/organization/tree";
pub const STATS_PATH: &str = "/api/organization/stats";
pub const POSITIONS_PATH: &str = "/api/organization/positions";

/// The backend answers either with the bare payload or wrapped in `data`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgStats {
    #[serde(default)]
    pub total_units: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_positions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: OrgUnitId,
    #[serde(default)]
    pub name_th: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub level: Option<String>,
}

/// Outcome of one independent part of a combined load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubFetch<T> {
    Loaded(T),
    Failed(String),
}

impl<T> SubFetch<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Loaded(_) => None,
            Self::Failed(message) => Some(message),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for SubFetch<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Rendered tree plus whatever went wrong loading it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    pub rows: Vec<TreeRow>,
    pub warning: Option<String>,
}

impl TreeView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgOverview {
    pub stats: SubFetch<OrgStats>,
    pub tree: SubFetch<Vec<OrgUnit>>,
    pub positions: SubFetch<Vec<Position>>,
}

impl OrgOverview {
    /// Stats from the backend, or counted from the tree when only the tree
    /// arrived.
    pub fn effective_stats(&self) -> Option<OrgStats> {
        if let Some(stats) = self.stats.loaded() {
            return Some(stats.clone());
        }
        self.tree.loaded().map(|forest| {
            let counted = TreeStats::collect(forest);
            OrgStats {
                total_units: counted.total_units as u64,
                total_users: counted.total_users,
                total_positions: self.positions.loaded().map_or(0, |p| p.len() as u64),
            }
        })
    }

    pub fn warnings(&self) -> Vec<&str> {
        [
            self.stats.warning(),
            self.tree.warning(),
            self.positions.warning(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Read-only client for the organization endpoints of the admin backend.
pub struct OrgClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl OrgClient {
    pub fn new(base_url: &str, token: Option<&str>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(ToString::to_string),
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = join_url(&self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(SERVICE, &url, &e))?;

        if !response.status().is_success() {
            return Err(api_error(SERVICE, response, self.token.as_deref()).await);
        }

        let envelope: Envelope<T> = response.json().await.map_err(|e| FetchError::Decode {
            service: SERVICE.to_string(),
            message: e.to_string(),
        })?;
        Ok(envelope.into_inner())
    }

    /// The organization forest, nested. Flat answers are nested here.
    pub async fn fetch_tree(&self) -> Result<Vec<OrgUnit>, AdminError> {
        let units: Vec<OrgUnit> = self.get_json(TREE_PATH).await?;
        tracing::debug!(roots = units.len(), "fetched org tree");
        if is_flat(&units) {
            return Ok(build_forest(units)?);
        }
        Ok(units)
    }

    pub async fn fetch_stats(&self) -> Result<OrgStats, FetchError> {
        self.get_json(STATS_PATH).await
    }

    pub async fn fetch_positions(&self) -> Result<Vec<Position>, FetchError> {
        self.get_json(POSITIONS_PATH).await
    }

    /// Fetch and render the tree. Failures leave an empty tree and a
    /// warning instead of an error.
    pub async fn load_tree(&self, language: Language) -> TreeView {
        let forest = match self.fetch_tree().await {
            Ok(forest) => forest,
            Err(err) => {
                tracing::warn!(error = %err, "org tree unavailable");
                return TreeView {
                    rows: Vec::new(),
                    warning: Some(format!("Could not load the organization tree: {err}")),
                };
            }
        };

        match render_rows(&forest, language) {
            Ok(rows) => TreeView {
                rows,
                warning: None,
            },
            Err(err) => TreeView {
                rows: Vec::new(),
                warning: Some(format!("Organization tree is malformed: {err}")),
            },
        }
    }

    /// Stats, tree and positions fetched concurrently; each part succeeds
    /// or fails on its own.
    pub async fn load_overview(&self) -> OrgOverview {
        let (stats, tree, positions) = tokio::join!(
            self.fetch_stats(),
            self.fetch_tree(),
            self.fetch_positions()
        );

        let overview = OrgOverview {
            stats: stats.into(),
            tree: tree.into(),
            positions: positions.into(),
        };
        for warning in overview.warnings() {
            tracing::warn!(%warning, "organization overview section failed");
        }
        overview
    }
}
