use tracing::{debug, warn};

use crate::models::AppointmentStatus;

/// Advisory view of the appointment lifecycle. The store accepts any status
/// write (any state is reachable from any state), so this never rejects a
/// transition; it knows the conventional flow and flags writes that stray
/// from it.
pub struct AppointmentLifecycle;

impl AppointmentLifecycle {
    pub fn new() -> Self {
        Self
    }

    /// The conventional next states: PENDING is confirmed by staff,
    /// CONFIRMED moves forward when the clinical session runs (or not),
    /// and anything can be cancelled explicitly.
    pub fn conventional_transitions(
        &self,
        current_status: &AppointmentStatus,
    ) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Attended,
                AppointmentStatus::Completed,
                AppointmentStatus::NoShow,
                AppointmentStatus::Cancelled,
            ],
            // Conventionally terminal; explicit cancellation stays open.
            AppointmentStatus::Attended
            | AppointmentStatus::Completed
            | AppointmentStatus::NoShow => vec![AppointmentStatus::Cancelled],
            AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn is_conventional(
        &self,
        current_status: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) -> bool {
        current_status == new_status
            || self
                .conventional_transitions(current_status)
                .contains(new_status)
    }

    /// ATTENDED also signals that a linked clinical history entry exists.
    pub fn is_terminal(&self, status: &AppointmentStatus) -> bool {
        matches!(
            status,
            AppointmentStatus::Attended
                | AppointmentStatus::Completed
                | AppointmentStatus::Cancelled
                | AppointmentStatus::NoShow
        )
    }

    pub fn note_transition(
        &self,
        current_status: &AppointmentStatus,
        new_status: &AppointmentStatus,
    ) {
        if self.is_conventional(current_status, new_status) {
            debug!("Status transition: {} -> {}", current_status, new_status);
        } else {
            warn!(
                "Unconventional status transition: {} -> {}",
                current_status, new_status
            );
        }
    }
}

impl Default for AppointmentLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
