//! Booking-code generation. Codes are short human-readable identifiers
//! printed on confirmations; the prefix tells apart how the appointment was
//! created.

use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

fn random_block(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}

/// Staff-created appointments: `BEE-XXXXX`.
pub fn staff_booking_code() -> String {
    format!("BEE-{}", random_block(5))
}

/// Treatment-plan follow-up sessions: `BEE-PLAN-XXXX`.
pub fn plan_booking_code() -> String {
    format!("BEE-PLAN-{}", random_block(4))
}

/// Portal bookings reuse the head of the appointment id: `WEB-XXXXX`.
pub fn portal_booking_code(appointment_id: Uuid) -> String {
    format!(
        "WEB-{}",
        appointment_id.to_string()[..5].to_uppercase()
    )
}
