pub mod entrypoint;
pub mod service;
