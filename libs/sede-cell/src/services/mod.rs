pub mod sede;

pub use sede::SedeService;
