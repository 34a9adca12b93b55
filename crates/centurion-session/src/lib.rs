// SPDX-License-Identifier: Apache-2.0
//! The session mediator: connection registry plus the attacker/defender
//! combat dispatch logic.

mod connection;
mod error;
mod mediator;

pub use connection::ConnectionRegistry;
pub use error::SessionError;
pub use mediator::SessionMediator;
