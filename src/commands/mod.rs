pub mod cancel;
pub mod location;
pub mod select_service;
pub mod start;
