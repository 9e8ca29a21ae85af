// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use hubbl_domain::AppointmentAction;

#[test]
fn test_command_reports_action_and_event() {
    let commands: [(Command, AppointmentAction); 3] = [
        (
            Command::CreateAppointment {
                event_id: 4,
                client_id: 9,
            },
            AppointmentAction::Create,
        ),
        (
            Command::CancelAppointment {
                event_id: 4,
                appointment_id: 2,
            },
            AppointmentAction::Cancel,
        ),
        (
            Command::DeleteAppointment {
                event_id: 4,
                appointment_id: 2,
            },
            AppointmentAction::Delete,
        ),
    ];

    for (command, action) in commands {
        assert_eq!(command.action(), action);
        assert_eq!(command.event_id(), 4);
    }
}
