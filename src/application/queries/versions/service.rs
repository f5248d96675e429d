// src/application/queries/versions/service.rs
use std::sync::Arc;

use crate::domain::version::TemplateVersionRepository;

pub struct VersionQueryService {
    pub(super) repo: Arc<dyn TemplateVersionRepository>,
}

impl VersionQueryService {
    pub fn new(repo: Arc<dyn TemplateVersionRepository>) -> Self {
        Self { repo }
    }
}
