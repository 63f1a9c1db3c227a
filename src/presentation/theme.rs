//! Theme and palette
//!
//! Screens pick their style variant from the active theme's palette.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Process-wide color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Persisted form, also the key in the `theme` namespace
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Colors for this theme
    pub fn palette(self) -> Palette {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Hex colors a screen renders with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub income: &'static str,
    pub expense: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#F5F7FA",
    surface: "#FFFFFF",
    text: "#1C1C1E",
    muted: "#8E8E93",
    accent: "#3A7BD5",
    income: "#2E9E5B",
    expense: "#D64545",
};

const DARK: Palette = Palette {
    background: "#080C10",
    surface: "#141A20",
    text: "#DCDCDC",
    muted: "#8C8C8C",
    accent: "#50A0A0",
    income: "#4CC38A",
    expense: "#C85050",
};
