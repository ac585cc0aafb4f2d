// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciliation of assistant containers that missed or failed their
//! initial remote configuration.

pub mod providers;
pub mod reconciler;

pub use providers::{ProviderConfigRegistry, ProviderConfigSpec};
pub use reconciler::Reconciler;
