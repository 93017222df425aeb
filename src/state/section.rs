//! Visible section of the widget

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::WidgetError;

/// Which display the shell currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Clock,
    Stopwatch,
    Timer,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Clock => "clock",
            Section::Stopwatch => "stopwatch",
            Section::Timer => "timer",
        };
        f.write_str(name)
    }
}

impl FromStr for Section {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "clock" => Ok(Section::Clock),
            "stopwatch" => Ok(Section::Stopwatch),
            "timer" => Ok(Section::Timer),
            _ => Err(WidgetError::UnknownSection(s.to_string())),
        }
    }
}
