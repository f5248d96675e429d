// src/application/queries/versions/mod.rs
mod history;
mod service;

pub use history::{HistoryFormat, VersionHistoryQuery};
pub use service::VersionQueryService;
