//! Stored image references and the capability that turns them into URLs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque reference to a stored image (a media-relative path or a remote
/// public id, depending on the asset backend).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    /// Wrap a raw reference. Blank input means "no image" and yields `None`.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == raw.len() {
            Some(Self(raw))
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset '{reference}' cannot be resolved: {reason}")]
    Unresolvable { reference: String, reason: String },

    #[error("asset backend is not configured: {0}")]
    NotConfigured(String),
}

impl AssetError {
    pub fn unresolvable(asset: &AssetRef, reason: impl Into<String>) -> Self {
        Self::Unresolvable {
            reference: asset.as_str().to_string(),
            reason: reason.into(),
        }
    }
}

/// Resolves an asset reference to a publicly retrievable URL.
///
/// Which backend is used (local media directory, remote object storage) is
/// decided once at process startup; callers only see this interface.
pub trait AssetResolver: Send + Sync {
    fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError>;
}

impl<R> AssetResolver for Arc<R>
where
    R: AssetResolver + ?Sized,
{
    fn resolve(&self, asset: &AssetRef) -> Result<String, AssetError> {
        (**self).resolve(asset)
    }
}
