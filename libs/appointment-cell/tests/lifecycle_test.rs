use appointment_cell::models::AppointmentStatus;
use appointment_cell::services::AppointmentLifecycle;

#[test]
fn pending_is_conventionally_confirmed_by_staff() {
    let lifecycle = AppointmentLifecycle::new();

    assert!(lifecycle.is_conventional(&AppointmentStatus::Pending, &AppointmentStatus::Confirmed));
    assert!(!lifecycle.is_conventional(&AppointmentStatus::Pending, &AppointmentStatus::Attended));
}

#[test]
fn confirmed_moves_forward_when_the_session_runs() {
    let lifecycle = AppointmentLifecycle::new();

    for next in [
        AppointmentStatus::Attended,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
        AppointmentStatus::Cancelled,
    ] {
        assert!(lifecycle.is_conventional(&AppointmentStatus::Confirmed, &next));
    }
}

#[test]
fn anything_can_be_cancelled_explicitly() {
    let lifecycle = AppointmentLifecycle::new();

    for status in [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Attended,
        AppointmentStatus::Completed,
        AppointmentStatus::NoShow,
    ] {
        assert!(lifecycle.is_conventional(&status, &AppointmentStatus::Cancelled));
    }
}

#[test]
fn attended_is_terminal() {
    let lifecycle = AppointmentLifecycle::new();

    assert!(lifecycle.is_terminal(&AppointmentStatus::Attended));
    assert!(lifecycle.is_terminal(&AppointmentStatus::Cancelled));
    assert!(!lifecycle.is_terminal(&AppointmentStatus::Pending));
    assert!(!lifecycle.is_terminal(&AppointmentStatus::Confirmed));
}

#[test]
fn unconventional_transitions_are_noted_not_rejected() {
    let lifecycle = AppointmentLifecycle::new();

    // Direct writes may jump anywhere; note_transition only logs.
    lifecycle.note_transition(&AppointmentStatus::Cancelled, &AppointmentStatus::Attended);
    lifecycle.note_transition(&AppointmentStatus::Completed, &AppointmentStatus::Pending);
}

#[test]
fn status_round_trips_spanish_wire_values() {
    let status: AppointmentStatus = serde_json::from_str("\"NO ASISTIÓ\"").unwrap();
    assert_eq!(status, AppointmentStatus::NoShow);
    assert_eq!(
        serde_json::to_string(&AppointmentStatus::Pending).unwrap(),
        "\"POR CONFIRMAR\""
    );
    assert_eq!(AppointmentStatus::Attended.to_string(), "ATENDIDO");
}
