pub mod catalog;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod keyboards;
pub mod location;
pub mod machine;
pub mod storage;
pub mod templates;
pub mod transport;
pub mod types;
