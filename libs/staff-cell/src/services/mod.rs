pub mod professional;
pub mod user;

pub use professional::ProfessionalService;
pub use user::UserService;
