//! Asset data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identifier of an asset in the device media store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new asset ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A photo in the device library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAsset {
    /// Media store identifier.
    pub id: AssetId,
    /// When the photo was taken.
    pub creation_time: DateTime<Utc>,
    /// Local URI used to render the photo.
    pub uri: String,
    /// Pixel width (0 if unknown).
    pub width: u32,
    /// Pixel height (0 if unknown).
    pub height: u32,
}

impl PhotoAsset {
    /// Creates an asset without dimension metadata.
    #[must_use]
    pub fn new(
        id: impl Into<AssetId>,
        creation_time: DateTime<Utc>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            creation_time,
            uri: uri.into(),
            width: 0,
            height: 0,
        }
    }

    /// Sets the pixel dimensions.
    #[must_use]
    pub const fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Kind of media to request from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still photos.
    #[default]
    Photo,
    /// Videos.
    Video,
}

impl MediaKind {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
        }
    }
}

/// Photo library access state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Access granted.
    Granted,
    /// Access refused by the user or the platform.
    Denied,
    /// The user has not been asked yet.
    #[default]
    Undetermined,
}

impl PermissionState {
    /// Parse from the platform string representation.
    ///
    /// Unknown values are treated as undetermined.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Undetermined,
        }
    }

    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Undetermined => "undetermined",
        }
    }

    /// Check if access is granted.
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Collapse the answer to an explicit access request.
    ///
    /// Anything short of a grant counts as a refusal once the user was asked.
    #[must_use]
    pub const fn after_request(self) -> Self {
        match self {
            Self::Granted => Self::Granted,
            Self::Denied | Self::Undetermined => Self::Denied,
        }
    }
}

impl std::fmt::Display for PermissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
