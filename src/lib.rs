//! Coaching Core - usage throttling and commitment accountability.
//!
//! This crate gates costly AI coaching calls (per-identity rate windows and
//! per-fingerprint demo quotas) and tracks the commitments users make during
//! coaching sessions, classifying them for reminders.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
