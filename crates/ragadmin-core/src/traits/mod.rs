// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service trait definitions for dependency injection.
//!
//! Every component takes its collaborators through these traits rather than
//! reaching for a process-wide registry, so tests can substitute in-memory
//! fakes. All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod records;
pub mod settings;
pub mod token;
pub mod transport;

pub use records::RecordStore;
pub use settings::SettingsStore;
pub use token::TokenSource;
pub use transport::RagTransport;
