use crate::{Corner, Point, Region, RegionId, RegionPayload, ValidationError};

use std::str::FromStr;

/// Editable field of a [`RegionDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    /// Display name.
    Name,
    /// Left edge.
    X1,
    /// Top edge.
    Y1,
    /// Right edge.
    X2,
    /// Bottom edge.
    Y2,
}

impl DraftField {
    /// The corner a coordinate field belongs to; `None` for the name.
    pub fn corner(self) -> Option<Corner> {
        match self {
            DraftField::Name => None,
            DraftField::X1 | DraftField::Y1 => Some(Corner::TopLeft),
            DraftField::X2 | DraftField::Y2 => Some(Corner::BottomRight),
        }
    }

    /// The two coordinate fields of `corner`, x first.
    pub fn axes(corner: Corner) -> [DraftField; 2] {
        match corner {
            Corner::TopLeft => [DraftField::X1, DraftField::Y1],
            Corner::BottomRight => [DraftField::X2, DraftField::Y2],
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(DraftField::Name),
            "x1" => Ok(DraftField::X1),
            "y1" => Ok(DraftField::Y1),
            "x2" => Ok(DraftField::X2),
            "y2" => Ok(DraftField::Y2),
            other => Err(format!("unknown field '{}'", other)),
        }
    }
}

/// In-memory region under creation or edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionDraft {
    /// Set when editing a persisted region.
    pub id: Option<RegionId>,
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

impl From<Region> for RegionDraft {
    fn from(region: Region) -> Self {
        Self {
            id: Some(region.id),
            name: region.name,
            x1: region.x1,
            y1: region.y1,
            x2: region.x2,
            y2: region.y2,
        }
    }
}

impl RegionDraft {
    /// Apply raw user input to `field`.
    ///
    /// Coordinates never fail to parse; unreadable input becomes `0`.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Name => self.name = value.to_string(),
            DraftField::X1 => self.x1 = parse_coordinate(value),
            DraftField::Y1 => self.y1 = parse_coordinate(value),
            DraftField::X2 => self.x2 = parse_coordinate(value),
            DraftField::Y2 => self.y2 = parse_coordinate(value),
        }
    }

    /// Move one corner.
    pub fn set_corner(&mut self, corner: Corner, point: Point) {
        match corner {
            Corner::TopLeft => {
                self.x1 = point.x;
                self.y1 = point.y;
            }
            Corner::BottomRight => {
                self.x2 = point.x;
                self.y2 = point.y;
            }
        }
    }

    /// Current corner coordinates as `(x1, y1, x2, y2)`.
    pub fn coordinates(&self) -> (i32, i32, i32, i32) {
        (self.x1, self.y1, self.x2, self.y2)
    }

    pub(crate) fn restore_coordinates(&mut self, (x1, y1, x2, y2): (i32, i32, i32, i32)) {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
    }

    /// Request body for create, update and temporary preview.
    pub fn payload(&self) -> RegionPayload {
        RegionPayload {
            name: self.name.clone(),
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
        }
    }

    /// Name first, then area.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.x1 == self.x2 || self.y1 == self.y2 {
            return Err(ValidationError::ZeroSize);
        }
        Ok(())
    }
}

/// Parse a leading integer the way a numeric form input would.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit, and anything without digits or out of range yields `0`.
pub fn parse_coordinate(input: &str) -> i32 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    rest[..end]
        .parse::<i64>()
        .ok()
        .map(|value| if negative { -value } else { value })
        .and_then(|value| i32::try_from(value).ok())
        .unwrap_or(0)
}
