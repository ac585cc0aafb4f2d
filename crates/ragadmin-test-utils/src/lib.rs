// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the ragadmin workspace.
//!
//! Provides in-memory fakes for the core service traits so orchestrator and
//! reconciler tests run without SQLite or HTTP.

pub mod memory_store;
pub mod mock_rag;

pub use memory_store::{MemoryRecords, MemorySettings};
pub use mock_rag::{MockRag, RecordedCall, StaticTokens};
