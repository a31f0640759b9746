//! Test utilities for graphbridge integration tests
//!
//! - `mock_engine`: scripted engines that record every query they receive
//! - `mock_entity`: in-memory native entities and collections

#![allow(dead_code)]

pub mod mock_engine;
pub mod mock_entity;
