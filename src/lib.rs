//! Configuration loader for the partitioning step of the installer.
//!
//! Reads the partition module's settings, reconciles legacy and current
//! keys, and publishes the values later stages rely on into
//! [`storage::GlobalStorage`].

pub mod choices;
pub mod config;
pub mod error;
pub mod filesystem;
pub mod firmware;
pub mod settings;
pub mod size;
pub mod steps;
pub mod storage;
pub mod ui;
