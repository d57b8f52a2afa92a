//! Core orchestration layer for Arcade Manager
//!
//! This crate coordinates the leaf crates into the launcher's two flows:
//!
//! - **Startup reconciliation**: mirror the bundled asset tree into the data
//!   root (never overwriting user files), then migrate the settings INI.
//! - **Launch preparation**: expand the requested workload into its required
//!   archive chain, report what is missing, realize the chain into the ROM
//!   cache, and hand the resolved paths to the execution shell.
//!
//! # Architecture
//!
//! `arcade-core` sits above the leaf crates and below the GUI shell:
//!
//! ```text
//!                  GUI shell
//!                      |
//!                 arcade-core
//!                      |
//!     +---------+------+--------+----------+
//!     |         |               |          |
//! arcade-fs arcade-config arcade-catalog arcade-sync
//! ```

pub mod error;
pub mod launch;
pub mod logging;
pub mod startup;

pub use error::{Error, Result};
pub use launch::{LaunchParams, LaunchPlan, plan, realize};
pub use startup::{apply_video_settings, initialize};
