use std::fmt;

use serde::{Deserialize, Serialize};

/// Which corner of a region a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// `(x1, y1)`, recorded by hotkey A.
    TopLeft,
    /// `(x2, y2)`, recorded by hotkey B.
    BottomRight,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corner::TopLeft => f.write_str("top-left"),
            Corner::BottomRight => f.write_str("bottom-right"),
        }
    }
}

/// A screen point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate.
    pub y: i32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// The backend encodes points as `[x, y]`.
impl Serialize for Point {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let [x, y] = <[i32; 2]>::deserialize(deserializer)?;
        Ok(Self { x, y })
    }
}

/// Corners recorded by hotkey presses on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedCoordinatePair {
    /// Point recorded by the top-left hotkey, if pressed.
    #[serde(default)]
    pub top_left: Option<Point>,
    /// Point recorded by the bottom-right hotkey, if pressed.
    #[serde(default)]
    pub bottom_right: Option<Point>,
}

impl CapturedCoordinatePair {
    /// Both corners are present.
    pub fn is_complete(&self) -> bool {
        self.top_left.is_some() && self.bottom_right.is_some()
    }

    /// The point recorded for `corner`.
    pub fn get(&self, corner: Corner) -> Option<Point> {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::BottomRight => self.bottom_right,
        }
    }

    /// Present corners in top-left, bottom-right order.
    pub fn corners(&self) -> impl Iterator<Item = (Corner, Point)> + '_ {
        [Corner::TopLeft, Corner::BottomRight]
            .into_iter()
            .filter_map(move |corner| self.get(corner).map(|point| (corner, point)))
    }
}
