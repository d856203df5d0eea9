//! Coin-Op - Terminal Arcade Cabinet Library
//!
//! This module exposes the game simulations for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod app;
pub mod build_info;
pub mod constants;
pub mod games;
pub mod input;
pub mod scheduler;
pub mod scores;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
