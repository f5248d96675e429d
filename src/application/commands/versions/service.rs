// src/application/commands/versions/service.rs
use std::sync::Arc;

use crate::application::ports::ClockPort;
use crate::domain::version::TemplateVersionRepository;

pub struct VersionCommandService {
    pub(super) repo: Arc<dyn TemplateVersionRepository>,
    pub(super) clock: Arc<ClockPort>,
}

impl VersionCommandService {
    pub fn new(repo: Arc<dyn TemplateVersionRepository>, clock: Arc<ClockPort>) -> Self {
        Self { repo, clock }
    }
}
