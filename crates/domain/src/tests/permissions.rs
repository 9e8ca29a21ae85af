// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AppointmentAction, DomainError, WorkerPermission, WorkerPermissions};
use std::str::FromStr;

#[test]
fn test_every_permission_has_a_distinct_bit() {
    let combined: u32 = WorkerPermission::ALL
        .iter()
        .fold(0, |acc, permission| {
            assert_eq!(acc & permission.bit(), 0, "{permission} overlaps");
            acc | permission.bit()
        });

    assert_eq!(combined, WorkerPermissions::all().bits());
}

#[test]
fn test_grant_and_revoke() {
    let mut permissions: WorkerPermissions = WorkerPermissions::empty();
    assert!(permissions.is_empty());

    permissions.grant(WorkerPermission::CreateEventAppointments);
    assert!(permissions.allows(WorkerPermission::CreateEventAppointments));
    assert!(!permissions.allows(WorkerPermission::DeleteEventAppointments));

    permissions.revoke(WorkerPermission::CreateEventAppointments);
    assert!(!permissions.allows(WorkerPermission::CreateEventAppointments));
    assert!(permissions.is_empty());
}

#[test]
fn test_from_bits_rejects_unknown_bits() {
    let result: Result<WorkerPermissions, DomainError> = WorkerPermissions::from_bits(1 << 31);
    assert_eq!(result, Err(DomainError::InvalidPermissionBits(1 << 31)));
}

#[test]
fn test_from_bits_restores_stored_set() {
    let stored: WorkerPermissions = WorkerPermissions::empty()
        .with(WorkerPermission::UpdateEventAppointments)
        .with(WorkerPermission::CreateTags);

    let restored: WorkerPermissions = WorkerPermissions::from_bits(stored.bits()).unwrap();

    assert_eq!(restored, stored);
    assert_eq!(
        restored.iter().collect::<Vec<_>>(),
        vec![
            WorkerPermission::CreateTags,
            WorkerPermission::UpdateEventAppointments
        ]
    );
}

#[test]
fn test_permission_names_parse_back() {
    for permission in WorkerPermission::ALL {
        assert_eq!(
            WorkerPermission::from_str(permission.as_str()).unwrap(),
            permission
        );
    }
    assert!(matches!(
        WorkerPermission::from_str("launchRockets"),
        Err(DomainError::UnknownPermission(_))
    ));
}

#[test]
fn test_permissions_serialize_as_names() {
    let permissions: WorkerPermissions = [
        WorkerPermission::CreateEventAppointments,
        WorkerPermission::DeleteEventAppointments,
    ]
    .into_iter()
    .collect();

    let json: String = serde_json::to_string(&permissions).unwrap();
    assert_eq!(json, r#"["createEventAppointments","deleteEventAppointments"]"#);

    let parsed: WorkerPermissions = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, permissions);
}

#[test]
fn test_each_appointment_action_requires_its_own_permission() {
    assert_eq!(
        AppointmentAction::Create.required_permission(),
        WorkerPermission::CreateEventAppointments
    );
    assert_eq!(
        AppointmentAction::Cancel.required_permission(),
        WorkerPermission::UpdateEventAppointments
    );
    assert_eq!(
        AppointmentAction::Delete.required_permission(),
        WorkerPermission::DeleteEventAppointments
    );
}
