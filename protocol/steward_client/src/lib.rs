pub mod application;
pub mod instance;
pub mod service;
pub mod steward;
