// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic name derivation for assistants and containers.

use ragadmin_core::types::ProviderType;

/// Lower-case the input, collapse non-alphanumeric runs to a single
/// hyphen, and trim leading/trailing hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Derive the unique assistant name from province code and category name.
pub fn assistant_name(province_code: &str, category_name: &str) -> String {
    format!("{}-{}", province_code.to_lowercase(), slugify(category_name))
}

/// Derive a container name for one provider type.
pub fn container_name(assistant_name: &str, provider: ProviderType) -> String {
    format!("{assistant_name}-{provider}").to_lowercase()
}
