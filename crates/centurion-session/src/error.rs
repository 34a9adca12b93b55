// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Errors raised outside the per-message protocol flow — these abort the
/// session rather than producing an `error` frame.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("player {0} is not registered")]
    UnknownPlayer(String),
}
