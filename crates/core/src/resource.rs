//! Resource trait: read-only named content addressed by URI.
//!
//! Resources differ from tools only in how they are exposed: they take no
//! arguments and are read rather than invoked.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::error::ToolError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[async_trait]
pub trait Resource: Send + Sync {
    /// Stable URI, e.g. `file:///price/last_update`.
    fn uri(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn mime_type(&self) -> &str {
        "text/plain"
    }

    async fn read(&self) -> std::result::Result<String, ToolError>;

    fn to_definition(&self) -> ResourceDefinition {
        ResourceDefinition {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            mime_type: self.mime_type().to_string(),
        }
    }
}

/// Resources keyed by URI.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, Box<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: Box<dyn Resource>) {
        self.resources.insert(resource.uri().to_string(), resource);
    }

    pub fn get(&self, uri: &str) -> Option<&dyn Resource> {
        self.resources.get(uri).map(|r| r.as_ref())
    }

    /// All resource definitions, sorted by URI.
    pub fn definitions(&self) -> Vec<ResourceDefinition> {
        let mut defs: Vec<ResourceDefinition> =
            self.resources.values().map(|r| r.to_definition()).collect();
        defs.sort_by(|a, b| a.uri.cmp(&b.uri));
        defs
    }

    pub async fn read(&self, uri: &str) -> std::result::Result<String, ToolError> {
        let resource = self
            .resources
            .get(uri)
            .ok_or_else(|| ToolError::ResourceNotFound(uri.to_string()))?;
        resource.read().await
    }
}
