use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::CatalogError;

/// Supported conference years, in the order they are offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Year {
    #[default]
    Y2023,
    Y2022,
    Y2019,
    Y2018,
    Y2017,
    Y2016,
}

impl Year {
    pub const ALL: [Year; 6] = [
        Year::Y2023,
        Year::Y2022,
        Year::Y2019,
        Year::Y2018,
        Year::Y2017,
        Year::Y2016,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Year::Y2023 => "2023",
            Year::Y2022 => "2022",
            Year::Y2019 => "2019",
            Year::Y2018 => "2018",
            Year::Y2017 => "2017",
            Year::Y2016 => "2016",
        }
    }

    pub fn number(self) -> i32 {
        match self {
            Year::Y2023 => 2023,
            Year::Y2022 => 2022,
            Year::Y2019 => 2019,
            Year::Y2018 => 2018,
            Year::Y2017 => 2017,
            Year::Y2016 => 2016,
        }
    }

    /// Name of the bundled resource holding this year's playlist.
    pub fn resource_name(self) -> String {
        format!("playlist-{}.json", self.label())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Year {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Year::ALL
            .into_iter()
            .find(|year| year.label() == s)
            .ok_or_else(|| CatalogError::UnsupportedYear(s.to_string()))
    }
}

impl TryFrom<String> for Year {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.label().to_string()
    }
}

/// One year's set of talks, in source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub year: i32,
    pub items: Vec<VideoRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Generated at decode time; only used to tell records apart in views.
    #[serde(skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub speaker: String,
    #[serde(rename = "timeLine")]
    pub time_line: String,
    #[serde(rename = "referenceLink")]
    pub reference_link: String,
    pub thumbnail: String,
    #[serde(rename = "videoID")]
    pub video_id: String,
}

/// Everything the player view needs for a selected talk.
#[derive(Debug, Clone, Serialize)]
pub struct Playback {
    pub year: Year,
    pub title: String,
    pub watch_url: String,
    pub embed_url: String,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<Year>,
    pub default: Year,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub year: i32,
    pub query: String,
    pub total: usize,
    pub items: Vec<VideoRecord>,
}
