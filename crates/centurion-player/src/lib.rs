// SPDX-License-Identifier: Apache-2.0
//! Concurrency-safe player registry: identity, team, online flag, score.

mod model;
mod registry;

pub use model::{Player, Team};
pub use registry::{PlayerError, PlayerRegistry};
