// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `people` — owner, worker, and client lookups by person id
//! - `events` — event and calendar lookups, week listings with occupancy
//! - `appointments` — appointment counts and scoped lookups

pub mod appointments;
pub mod events;
pub mod people;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Converts a `COUNT(*)` result to a place count.
pub(crate) fn count_to_u32(count: i64) -> Result<u32, PersistenceError> {
    count
        .to_u32()
        .ok_or_else(|| PersistenceError::DatabaseError(format!("Count conversion failed: {count}")))
}
