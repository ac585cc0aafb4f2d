// SPDX-FileCopyrightText: 2026 Ragadmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant provisioning: naming, remote container creation with local
//! rollback, and per-container agent configuration.

pub mod agent;
pub mod naming;
pub mod orchestrator;
pub mod settings;

pub use agent::{AgentConfigurator, AgentProcessResult};
pub use naming::{assistant_name, container_name, slugify};
pub use orchestrator::Orchestrator;
pub use settings::{DataPathConfig, S3Config, resolve_data_path, resolve_s3_config};
