pub mod error;
pub mod logger;
pub mod resources;
pub mod validation;
