pub mod appointment;
pub mod lifecycle;
pub mod treatment_plan;

pub use appointment::AppointmentService;
pub use lifecycle::AppointmentLifecycle;
pub use treatment_plan::TreatmentPlanService;
