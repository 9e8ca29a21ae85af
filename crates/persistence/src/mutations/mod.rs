// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `appointments` — insert, cancel, delete, and applying a core `Mutation`
//! - `people` — registering persons with their role record
//! - `events` — calendars and events
//! - `fixtures` — loading seed data

pub mod appointments;
pub mod events;
pub mod fixtures;
pub mod people;
