// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Logger setup for applications embedding graphbridge

use log::LevelFilter;

/// Initialize `env_logger` with a default level
///
/// `RUST_LOG` still overrides per-module filters. Calling this more than once
/// is harmless; only the first call installs a logger.
pub fn init(level: LevelFilter) -> bool {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init()
        .is_ok()
}

/// Initialize logging for a verbosity flag: debug when verbose, warn otherwise
pub fn init_verbose(verbose: bool) -> bool {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    init(level)
}
