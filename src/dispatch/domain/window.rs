//! Popup window requests and remembered geometry.

use serde::{Deserialize, Serialize};

/// Size and position of the helper window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowGeometry {
    /// Width in pixels.
    pub width: i64,
    /// Height in pixels.
    pub height: i64,
    /// Distance from the top screen edge; `None` lets the host decide.
    pub top: Option<i64>,
    /// Distance from the left screen edge; `None` lets the host decide.
    pub left: Option<i64>,
}

/// Request to open a popup window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Page to load.
    pub url: String,
    /// Initial geometry.
    pub geometry: WindowGeometry,
}
