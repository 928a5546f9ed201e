// Rust guideline compliant 2026-02-06

//! Relman Core Library
//!
//! This crate provides the foundational components for the relman release
//! manager:
//! - Data models (Issue, Version, references)
//! - Hierarchy reconstruction (epics, epic children, standalone issues, subtasks)
//! - Configuration loading (file, environment, validation)
//! - Error types and result handling

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod models;

pub use config::{ChangelogFormat, Config, Credentials};
pub use error::{Error, Result};
pub use hierarchy::{resolve_epic, ReleaseHierarchy, Resolution};
pub use models::{
    EpicLink, Issue, IssueFields, IssueRef, IssueType, Priority, Project, SearchResults, Status,
    StatusCategory, User, Version, VersionState,
};
