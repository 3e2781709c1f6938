pub mod access;
pub mod auth;
pub mod error;
pub mod timefmt;
