// src/application/commands/versions/mod.rs
mod create;
mod service;

pub use create::{CreateVersionCommand, CreateVersionCommandBuilder};
pub use service::VersionCommandService;
