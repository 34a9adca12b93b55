// SPDX-License-Identifier: Apache-2.0
use serde::Deserialize;

/// Process configuration, loaded once at startup from `centurion_`-prefixed
/// environment variables.
///
/// `example_enabled` is read but unused here — it gates the example
/// attacker/defender bot clients, which run as separate processes outside
/// this core.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub example_enabled: bool,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Ok(envy::prefixed("centurion_").from_env::<Self>()?)
    }
}
