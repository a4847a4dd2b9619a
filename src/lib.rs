//! kronos-dashboard - A terminal dashboard for the Kronos schedule server
//!
//! This library lists, creates, pauses, resumes, triggers and deletes
//! schedules through the Kronos REST API. Every destructive or creating
//! action is confirmed through one shared dialog, coordinated over a small
//! channel bus.
//!
//! # Modules
//!
//! * [`api`] - REST client and the `ScheduleApi` trait
//! * [`config`] - Application configuration management
//! * [`dialog`] - The shared confirmation dialog and its coordination bus
//! * [`model`] - Schedule and form field data types
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Kronos REST API client
pub mod api;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Shared confirmation dialog: bus, session model, host and coordinator
pub mod dialog;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Schedule resources and form metadata
pub mod model;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;
