// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk defaults for `create`, loaded from an optional TOML file and
//! overridden by any flag the user passed explicitly.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateConfig {
    pub max_files: u32,
    pub thumb_res: (u16, u16),
    pub small_res: (u16, u16),
}

impl Default for CreateConfig {
    fn default() -> Self {
        CreateConfig {
            max_files: 10,
            thumb_res: (64, 64),
            small_res: (256, 256),
        }
    }
}

impl CreateConfig {
    pub fn load(path: &std::path::Path) -> anyhow::Result<CreateConfig> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_original_cli_defaults() {
        let config = CreateConfig::default();
        assert_eq!(config.max_files, 10);
        assert_eq!(config.thumb_res, (64, 64));
        assert_eq!(config.small_res, (256, 256));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: CreateConfig = toml::from_str("max_files = 5").unwrap();
        assert_eq!(config.max_files, 5);
        assert_eq!(config.thumb_res, (64, 64));
    }
}
