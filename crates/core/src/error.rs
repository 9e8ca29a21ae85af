// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hubbl_domain::DomainError;

/// Errors that can occur while deciding a booking command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The snapshot was read for a different event than the command targets.
    SnapshotMismatch {
        /// The event the command targets.
        command_event_id: i64,
        /// The event the snapshot describes.
        snapshot_event_id: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SnapshotMismatch {
                command_event_id,
                snapshot_event_id,
            } => write!(
                f,
                "Snapshot for event {snapshot_event_id} used with command for event {command_event_id}"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
