//! Fame list categories
//!
//! Categories travel over the wire as their display labels. Storage uses the stable
//! snake_case key. Parsing accepts the label, the English name, or the key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseValueError;

/// Fixed label classifying a member or an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Владелец", alias = "Owner", alias = "owner")]
    Owner,
    #[serde(rename = "Модераторы", alias = "Moderators", alias = "moderators")]
    Moderators,
    #[serde(rename = "Медийки", alias = "Media", alias = "media")]
    Media,
    #[serde(rename = "Высокий фейм", alias = "High-Fame", alias = "high_fame")]
    HighFame,
    #[serde(rename = "Средний фейм", alias = "Mid-Fame", alias = "mid_fame")]
    MidFame,
    #[serde(rename = "Малый фейм", alias = "Low-Fame", alias = "low_fame")]
    LowFame,
    #[serde(rename = "Гаранты", alias = "Guarantor", alias = "guarantor")]
    Guarantor,
    #[serde(rename = "Кодеры", alias = "Coder", alias = "coder")]
    Coder,
    #[serde(rename = "Скам", alias = "Scam", alias = "scam")]
    Scam,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 9] = [
        Self::Owner,
        Self::Moderators,
        Self::Media,
        Self::HighFame,
        Self::MidFame,
        Self::LowFame,
        Self::Guarantor,
        Self::Coder,
        Self::Scam,
    ];

    /// Stable storage key
    pub const fn key(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Moderators => "moderators",
            Self::Media => "media",
            Self::HighFame => "high_fame",
            Self::MidFame => "mid_fame",
            Self::LowFame => "low_fame",
            Self::Guarantor => "guarantor",
            Self::Coder => "coder",
            Self::Scam => "scam",
        }
    }

    /// Display label shown on the fame list
    pub const fn label(self) -> &'static str {
        match self {
            Self::Owner => "Владелец",
            Self::Moderators => "Модераторы",
            Self::Media => "Медийки",
            Self::HighFame => "Высокий фейм",
            Self::MidFame => "Средний фейм",
            Self::LowFame => "Малый фейм",
            Self::Guarantor => "Гаранты",
            Self::Coder => "Кодеры",
            Self::Scam => "Скам",
        }
    }

    pub const fn english(self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Moderators => "Moderators",
            Self::Media => "Media",
            Self::HighFame => "High-Fame",
            Self::MidFame => "Mid-Fame",
            Self::LowFame => "Low-Fame",
            Self::Guarantor => "Guarantor",
            Self::Coder => "Coder",
            Self::Scam => "Scam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                c.label() == wanted
                    || c.key() == wanted
                    || c.english().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ParseValueError::new("category", s))
    }
}
