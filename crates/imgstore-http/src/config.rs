// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-wide defaults, loaded from an optional TOML file alongside the
//! store path argument. Mirrors the original server's hardcoded
//! `LISTENING_ADDR`/`WEB_DIRECTORY`/`TMP_DIRECTORY` constants, made
//! configurable instead of compiled in.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_dir: PathBuf,
    pub upload_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            listen_addr: "127.0.0.1:8000".to_string(),
            web_dir: PathBuf::from("."),
            upload_dir: std::env::temp_dir(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &std::path::Path) -> anyhow::Result<ServerConfig> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_original_server_constants() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:8000");
        assert_eq!(config.web_dir, PathBuf::from("."));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: ServerConfig = toml::from_str("listen_addr = \"0.0.0.0:9000\"").unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:9000");
        assert_eq!(config.web_dir, PathBuf::from("."));
    }
}
