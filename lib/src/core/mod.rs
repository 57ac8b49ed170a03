//! # Dockhand Core Infrastructure
//!
//! File: lib/src/core/mod.rs
//!
//! ## Overview
//!
//! Aggregates the foundational components every other module leans on:
//! connection configuration and the error taxonomy.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dockhand::core::config::ClientConfig;
//! use dockhand::core::error::{DockhandError, Result};
//! ```
//!
pub mod config;
pub mod error;
