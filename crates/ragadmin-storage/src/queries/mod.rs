// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules, one per record family.

pub mod assistants;
pub mod catalog;
pub mod containers;
pub mod settings;
