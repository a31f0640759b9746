// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Executor configuration

use serde::{Deserialize, Serialize};

/// Environment variable holding debug switches, e.g. `GRAPHBRIDGE_DEBUG=database,params`
pub const DEBUG_ENV_VAR: &str = "GRAPHBRIDGE_DEBUG";

/// Configuration for a [`Database`](crate::Database)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Log query text, timings, columns and record counts at debug level
    #[serde(default)]
    pub debug: bool,

    /// Also log bound parameter values (only with `debug`)
    #[serde(default)]
    pub log_params: bool,
}

impl DatabaseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read debug switches from [`DEBUG_ENV_VAR`]
    ///
    /// The variable is a comma separated list. `database` turns on query
    /// logging, `params` turns on parameter logging as well.
    pub fn from_env() -> Self {
        match std::env::var(DEBUG_ENV_VAR) {
            Ok(value) => Self::from_switches(&value),
            Err(_) => Self::default(),
        }
    }

    fn from_switches(value: &str) -> Self {
        let mut config = Self::default();
        for switch in value.split(',').map(str::trim) {
            match switch {
                "database" => config.debug = true,
                "params" => {
                    config.debug = true;
                    config.log_params = true;
                }
                "" => {}
                other => log::warn!("Unknown {} switch: {}", DEBUG_ENV_VAR, other),
            }
        }
        config
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_log_params(mut self, log_params: bool) -> Self {
        self.log_params = log_params;
        self
    }
}
