//! NBA Dashboard - 2017/2018 season win races and three-point shooting
//!
//! Loads the season box score CSVs, derives per-team standings views and a
//! per-player three-point summary, then renders them as an interactive
//! window or a static document.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod pipeline;
