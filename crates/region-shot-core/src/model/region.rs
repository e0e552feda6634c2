use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    /// Borrow the identifier as a path segment.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A persisted, named rectangular screen area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Backend-assigned identity.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
    /// Creation timestamp as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Region {
    /// Horizontal extent in pixels.
    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2)
    }

    /// Vertical extent in pixels.
    pub fn height(&self) -> u32 {
        self.y1.abs_diff(self.y2)
    }

    /// Reorder corners so `(x1, y1)` is top-left and `(x2, y2)` is bottom-right.
    pub fn normalized(mut self) -> Self {
        if self.x1 > self.x2 {
            std::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            std::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// The request body used to create or update this region.
    pub fn payload(&self) -> RegionPayload {
        RegionPayload {
            name: self.name.clone(),
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }
}

/// Body of create, update and temporary-preview requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPayload {
    /// Display name.
    pub name: String,
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl RegionPayload {
    /// True when the rectangle spans no pixels in one dimension.
    pub fn is_zero_size(&self) -> bool {
        self.x1 == self.x2 || self.y1 == self.y2
    }
}
