use crate::errors::CatalogError;
use crate::filter::filter_by_parent;
use crate::model::{Level, NodeId, TaxonomyNode, normalize_all};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Where taxonomy nodes come from.
///
/// Implementations normalize whatever shape the backend returns, so callers
/// only ever see canonical [`TaxonomyNode`]s.
#[async_trait]
pub trait TaxonomySource: Send + Sync {
    /// The whole universe of one level.
    async fn fetch_all(&self, level: Level) -> Result<Vec<TaxonomyNode>, CatalogError>;

    /// Nodes of `level` whose parent is `parent_id`.
    async fn fetch_children(
        &self,
        level: Level,
        parent_id: &NodeId,
    ) -> Result<Vec<TaxonomyNode>, CatalogError>;
}

/// REST backend client.
///
/// Collections live at `{base_url}/{segment}`; scoped fetches add the parent
/// as a query parameter, e.g. `caste?religionId=…`.
pub struct HttpTaxonomySource {
    base_url: String,
    token: Option<String>,
    http_client: reqwest::Client,
}

impl HttpTaxonomySource {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::ClientCreation {
                reason: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            http_client,
        })
    }

    fn collection_url(&self, level: Level) -> String {
        format!("{}/{}", self.base_url, level.segment())
    }

    async fn get_nodes(
        &self,
        level: Level,
        query: &[(&str, &str)],
    ) -> Result<Vec<TaxonomyNode>, CatalogError> {
        let url = self.collection_url(level);
        log::debug!("Fetching {level} options from {url} {query:?}");

        let mut request = self.http_client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::RequestFailed {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await.map_err(|e| CatalogError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let items = extract_items(&body).ok_or_else(|| CatalogError::Decode {
            url: url.clone(),
            reason: "expected an array or an object with a `data` array".to_string(),
        })?;

        let nodes = normalize_all(level, items);
        log::debug!("Fetched {} {level} options from {url}", nodes.len());
        Ok(nodes)
    }
}

#[async_trait]
impl TaxonomySource for HttpTaxonomySource {
    async fn fetch_all(&self, level: Level) -> Result<Vec<TaxonomyNode>, CatalogError> {
        self.get_nodes(level, &[]).await
    }

    async fn fetch_children(
        &self,
        level: Level,
        parent_id: &NodeId,
    ) -> Result<Vec<TaxonomyNode>, CatalogError> {
        let param = level
            .scope_param()
            .ok_or_else(|| CatalogError::InvalidRequest {
                level,
                reason: "this level has no parent to scope by".to_string(),
            })?;

        self.get_nodes(level, &[(param, parent_id.as_str())]).await
    }
}

/// Locate the node array in a response body.
///
/// The backend answers with a bare array on some endpoints and wraps it in
/// `data` (or `data.items`) on others.
fn extract_items(body: &Value) -> Option<&[Value]> {
    match body {
        Value::Array(items) => Some(items),
        Value::Object(object) => match object.get("data")? {
            Value::Array(items) => Some(items),
            Value::Object(inner) => inner.get("items")?.as_array().map(Vec::as_slice),
            _ => None,
        },
        _ => None,
    }
}

/// In-memory universes, filtered locally.
#[derive(Debug, Clone, Default)]
pub struct StaticTaxonomySource {
    universes: [Vec<TaxonomyNode>; Level::COUNT],
}

impl StaticTaxonomySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level, nodes: Vec<TaxonomyNode>) -> Self {
        self.universes[level.index()] = nodes;
        self
    }

    pub fn universe(&self, level: Level) -> &[TaxonomyNode] {
        &self.universes[level.index()]
    }
}

#[async_trait]
impl TaxonomySource for StaticTaxonomySource {
    async fn fetch_all(&self, level: Level) -> Result<Vec<TaxonomyNode>, CatalogError> {
        Ok(self.universe(level).to_vec())
    }

    async fn fetch_children(
        &self,
        level: Level,
        parent_id: &NodeId,
    ) -> Result<Vec<TaxonomyNode>, CatalogError> {
        if level.parent().is_none() {
            return Err(CatalogError::InvalidRequest {
                level,
                reason: "this level has no parent to scope by".to_string(),
            });
        }
        Ok(filter_by_parent(self.universe(level), Some(parent_id)))
    }
}
