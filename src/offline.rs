use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::viz::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfflineSample {
    Whitecaps2022,
    Chelsea2024,
    ManUnited2022,
}

impl OfflineSample {
    pub const ALL: [OfflineSample; 3] = [
        OfflineSample::Whitecaps2022,
        OfflineSample::Chelsea2024,
        OfflineSample::ManUnited2022,
    ];

    pub fn menu_key(self) -> &'static str {
        match self {
            OfflineSample::Whitecaps2022 => "1",
            OfflineSample::Chelsea2024 => "2",
            OfflineSample::ManUnited2022 => "3",
        }
    }

    pub fn from_menu_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.menu_key() == key.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            OfflineSample::Whitecaps2022 => "2022 Vancouver Whitecaps",
            OfflineSample::Chelsea2024 => "2024 Chelsea",
            OfflineSample::ManUnited2022 => "2022 Manchester United",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            OfflineSample::Whitecaps2022 => "whitecaps_sample_data.json",
            OfflineSample::Chelsea2024 => "chelsea_sample_data.json",
            OfflineSample::ManUnited2022 => "manunited_sample_data.json",
        }
    }

    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

#[derive(Debug, Deserialize)]
struct OfflineFile {
    players: Vec<Entry>,
}

pub fn load_offline_data(path: &Path) -> Result<Vec<Entry>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    parse_offline_json(&raw).with_context(|| format!("in {}", path.display()))
}

/// No schema checks beyond the shape itself: a missing key or a
/// non-integer `goals` is an error.
pub fn parse_offline_json(raw: &str) -> Result<Vec<Entry>> {
    let file: OfflineFile = serde_json::from_str(raw).context("invalid offline data json")?;
    Ok(file.players)
}
