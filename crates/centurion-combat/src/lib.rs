// SPDX-License-Identifier: Apache-2.0
//! Combat state machine and store: active combats plus a terminal archive.

mod model;
mod state;
mod store;

pub use model::Combat;
pub use state::CombatState;
pub use store::{CombatError, CombatStore};
