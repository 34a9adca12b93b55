// SPDX-License-Identifier: Apache-2.0
//! Wire schema for the Centurion combat core.
//!
//! [`http`] covers the registration/listing/installation JSON bodies;
//! [`socket`] covers the full-duplex message envelope exchanged after
//! upgrade.

pub mod http;
pub mod socket;

pub use http::CenturionResponse;
pub use socket::SocketMessage;
