use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two host windows a message or event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowRole {
    Main,
    Floating,
}

impl WindowRole {
    /// The window on the other side of a relay.
    pub fn other(self) -> Self {
        match self {
            Self::Main => Self::Floating,
            Self::Floating => Self::Main,
        }
    }
}

impl fmt::Display for WindowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Floating => write!(f, "floating"),
        }
    }
}

/// Renderer color scheme, persisted by the web UI under the `theme` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Parse the value stored in local storage. Anything other than
    /// `"dark"` (including a missing key) is light.
    pub fn from_storage(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Layout mode of the floating search window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatingMode {
    #[default]
    Compact,
    Expanded,
}

impl FloatingMode {
    /// Search input focus expands the window; blur collapses it.
    pub fn from_focus(focused: bool) -> Self {
        if focused {
            Self::Expanded
        } else {
            Self::Compact
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}
