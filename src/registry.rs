//! Model registry
//!
//! Immutable table mapping public model identifiers to upstream model
//! identifiers. Built once at startup and shared read-only by every request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Owner reported for every listed model
const OWNED_BY: &str = "system";

/// Model information as exposed on `GET /v1/models`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Model {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

/// Models list response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelsResponse {
    pub object: String,
    pub data: Vec<Model>,
}

/// Errors raised while building the registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("model table is empty")]
    Empty,

    #[error("duplicate public model id '{0}'")]
    Duplicate(String),
}

/// One public ↔ upstream mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMapping {
    pub public_id: String,
    pub upstream_id: String,
}

/// Read-only public → upstream model table
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    entries: Vec<ModelMapping>,
    /// Listing timestamp, fixed at construction so the listing stays stable
    created: i64,
}

impl ModelRegistry {
    /// Build a registry from ordered (public, upstream) pairs
    pub fn new<I, P, U>(pairs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        Self::with_created(pairs, chrono::Utc::now().timestamp())
    }

    /// Build a registry with an explicit listing timestamp
    pub fn with_created<I, P, U>(pairs: I, created: i64) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        let mut entries: Vec<ModelMapping> = Vec::new();

        for (public, upstream) in pairs {
            let public_id = public.into();
            if entries.iter().any(|e| e.public_id == public_id) {
                return Err(RegistryError::Duplicate(public_id));
            }
            entries.push(ModelMapping {
                public_id,
                upstream_id: upstream.into(),
            });
        }

        if entries.is_empty() {
            return Err(RegistryError::Empty);
        }

        Ok(Self { entries, created })
    }

    /// Resolve a public model id to its upstream id (exact match)
    pub fn resolve(&self, public_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.public_id == public_id)
            .map(|e| e.upstream_id.as_str())
    }

    /// Models in configuration order
    pub fn list(&self) -> Vec<Model> {
        self.entries
            .iter()
            .map(|e| Model {
                id: e.public_id.clone(),
                object: "model".to_string(),
                created: self.created,
                owned_by: OWNED_BY.to_string(),
            })
            .collect()
    }

    /// Full `GET /v1/models` body
    pub fn listing(&self) -> ModelsResponse {
        ModelsResponse {
            object: "list".to_string(),
            data: self.list(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
