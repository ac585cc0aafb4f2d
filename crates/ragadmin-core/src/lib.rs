// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the ragadmin provisioning service.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the ragadmin workspace. Components receive
//! their collaborators through the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RagAdminError;
pub use traits::{RagTransport, RecordStore, SettingsStore, TokenSource};
pub use types::{
    AgentConfigOutcome, Assistant, AssistantMetadata, Container, CreateAssistantRequest,
    ModelConfigOutcome, Province, ProviderType, RagResponse, ReconcileSummary,
    ServiceCategory, Setting,
};
