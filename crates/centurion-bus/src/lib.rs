// SPDX-License-Identifier: Apache-2.0
//! In-process, topic-addressed, fan-out event bus.
//!
//! Decouples the combat core (player registry, challenge registry, combat
//! store, session mediator) from observers such as a dashboard. A single
//! background dispatcher task owns delivery order; publishers only ever
//! touch a bounded ingress queue.

mod bus;
mod events;

pub use bus::{BusError, EventBus};
pub use events::BusEvent;
