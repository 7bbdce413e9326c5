//! Cadet Mission - Solar System
//!
//! A library crate providing the mission's plugins and pure logic
//! for testing and integration purposes.

pub mod audio;
pub mod camera;
pub mod config;
pub mod content;
pub mod flow;
pub mod input;
pub mod locale;
pub mod portrait;
pub mod quiz;
pub mod render;
pub mod storage;
pub mod texture;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
