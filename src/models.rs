use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Unique identity of a popup: creation timestamp plus a process-wide sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId {
    pub created_ms: i64,
    pub seq: u64,
}

impl fmt::Display for PopupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup-{}-{}", self.created_ms, self.seq)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualTheme {
    Blue,
    Green,
    Orange,
    Purple,
    Pink,
    Yellow,
    Cyan,
    Lime,
    Red,
    Teal,
    Indigo,
    Amber,
    Rose,
    Mint,
    Peach,
    Lavender,
    Coral,
    Sky,
    Lemon,
}

impl VisualTheme {
    pub const ALL: [VisualTheme; 19] = [
        VisualTheme::Blue,
        VisualTheme::Green,
        VisualTheme::Orange,
        VisualTheme::Purple,
        VisualTheme::Pink,
        VisualTheme::Yellow,
        VisualTheme::Cyan,
        VisualTheme::Lime,
        VisualTheme::Red,
        VisualTheme::Teal,
        VisualTheme::Indigo,
        VisualTheme::Amber,
        VisualTheme::Rose,
        VisualTheme::Mint,
        VisualTheme::Peach,
        VisualTheme::Lavender,
        VisualTheme::Coral,
        VisualTheme::Sky,
        VisualTheme::Lemon,
    ];
}

/// Edge or corner a popup slides in from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntranceDirection {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl EntranceDirection {
    pub const ALL: [EntranceDirection; 8] = [
        EntranceDirection::Top,
        EntranceDirection::Bottom,
        EntranceDirection::Left,
        EntranceDirection::Right,
        EntranceDirection::TopLeft,
        EntranceDirection::TopRight,
        EntranceDirection::BottomLeft,
        EntranceDirection::BottomRight,
    ];

    /// Unit offset (dx, dy) pointing towards the side the popup enters from.
    pub fn offset(self) -> (i32, i32) {
        match self {
            EntranceDirection::Top => (0, -1),
            EntranceDirection::Bottom => (0, 1),
            EntranceDirection::Left => (-1, 0),
            EntranceDirection::Right => (1, 0),
            EntranceDirection::TopLeft => (-1, -1),
            EntranceDirection::TopRight => (1, -1),
            EntranceDirection::BottomLeft => (-1, 1),
            EntranceDirection::BottomRight => (1, 1),
        }
    }
}

/// Complete display state of one popup card.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupDescriptor {
    pub id: PopupId,
    pub text: String,
    pub author: Option<String>,
    pub theme: VisualTheme,
    pub direction: EntranceDirection,
    /// Percent of the frame height, in `[0, vertical_max)`.
    pub top: f64,
    /// Percent of the frame width, in `[0, horizontal_max)`.
    pub left: f64,
    pub lifetime: Duration,
}

/// Next index to draw from a content set. Advanced once per created popup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CyclePosition(pub u64);

impl CyclePosition {
    pub fn index(self, len: usize) -> usize {
        (self.0 % len as u64) as usize
    }

    pub fn advance(self) -> Self {
        CyclePosition(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Stream,
    Debug,
}
