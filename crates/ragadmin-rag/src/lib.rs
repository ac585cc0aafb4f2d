// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Token cache and authenticated HTTP client for the external RAG service.
//!
//! [`TokenCache`] implements the `TokenSource` trait over the settings
//! store and the OAuth identity endpoint; [`RagClient`] implements the
//! `RagTransport` trait over the RAG service REST surface.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::TokenCache;
pub use client::RagClient;
pub use types::{AuthCredentials, TokenResponse};
