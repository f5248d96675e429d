// src/application/commands/versions/create.rs
use super::VersionCommandService;
use crate::{
    application::{
        dto::CreatedVersionDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        version::{
            approval::ApprovalWorkflow,
            changelog::ChangelogEntry,
            content::VersionContent,
            entity::{AuthorContribution, AuthorStatistics, NewTemplateVersion, VersionAuthor},
            services::{calculate_version_score, validate_version_content},
            value_objects::{
                TemplateId, TenantId, VersionIncrement, VersionNumber, VersionStatus,
            },
        },
    },
};

const MIN_TITLE_LENGTH: usize = 3;
const MIN_DESCRIPTION_LENGTH: usize = 10;

pub struct CreateVersionCommand {
    pub tenant_id: String,
    pub template_id: String,
    pub template_type: String,
    pub version_number: Option<String>,
    pub title: String,
    pub description: String,
    pub content: VersionContent,
    pub author_id: String,
    pub author_name: String,
    pub author_role: String,
    pub tags: Vec<String>,
    pub based_on_version: Option<String>,
    pub auto_publish: bool,
    pub skip_approval: bool,
}

impl CreateVersionCommand {
    pub fn builder() -> CreateVersionCommandBuilder {
        CreateVersionCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct CreateVersionCommandBuilder {
    tenant_id: Option<String>,
    template_id: Option<String>,
    template_type: Option<String>,
    version_number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    content: VersionContent,
    author_id: Option<String>,
    author_name: Option<String>,
    author_role: Option<String>,
    tags: Vec<String>,
    based_on_version: Option<String>,
    auto_publish: bool,
    skip_approval: bool,
}

impl CreateVersionCommandBuilder {
    pub fn tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    pub fn template_id(mut self, value: impl Into<String>) -> Self {
        self.template_id = Some(value.into());
        self
    }

    pub fn template_type(mut self, value: impl Into<String>) -> Self {
        self.template_type = Some(value.into());
        self
    }

    pub fn version_number(mut self, value: impl Into<String>) -> Self {
        self.version_number = Some(value.into());
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn content(mut self, content: VersionContent) -> Self {
        self.content = content;
        self
    }

    pub fn author(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        self.author_id = Some(id.into());
        self.author_name = Some(name.into());
        self.author_role = Some(role.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn based_on_version(mut self, value: impl Into<String>) -> Self {
        self.based_on_version = Some(value.into());
        self
    }

    pub fn auto_publish(mut self, auto_publish: bool) -> Self {
        self.auto_publish = auto_publish;
        self
    }

    pub fn skip_approval(mut self, skip_approval: bool) -> Self {
        self.skip_approval = skip_approval;
        self
    }

    pub fn build(self) -> CreateVersionCommand {
        CreateVersionCommand {
            tenant_id: self.tenant_id.unwrap_or_default(),
            template_id: self.template_id.unwrap_or_default(),
            template_type: self.template_type.unwrap_or_default(),
            version_number: self.version_number,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            content: self.content,
            author_id: self.author_id.unwrap_or_default(),
            author_name: self.author_name.unwrap_or_default(),
            author_role: self.author_role.unwrap_or_default(),
            tags: self.tags,
            based_on_version: self.based_on_version,
            auto_publish: self.auto_publish,
            skip_approval: self.skip_approval,
        }
    }
}

impl VersionCommandService {
    /// Creates a new template version: validates the request, resolves and
    /// checks the version number, validates content, assembles the full
    /// aggregate in memory and persists it with a single `create` call.
    pub async fn create_version(
        &self,
        command: CreateVersionCommand,
    ) -> ApplicationResult<CreatedVersionDto> {
        let template_id = command.template_id.clone();
        self.try_create(command).await.map_err(|err| match err {
            ApplicationError::Domain(DomainError::Persistence(cause)) => {
                tracing::error!(template_id = %template_id, error = %cause, "version creation failed");
                ApplicationError::infrastructure("internal error while creating version")
            }
            other => other,
        })
    }

    async fn try_create(
        &self,
        command: CreateVersionCommand,
    ) -> ApplicationResult<CreatedVersionDto> {
        let mut warnings = Vec::new();
        validate_request(&command, &mut warnings)?;

        let tenant_id = TenantId::new(command.tenant_id.clone())?;
        let template_id = TemplateId::new(command.template_id.clone())?;

        // Resolution of an omitted number always bumps minor; first version
        // of a template is 1.0.0.
        let version_number = match &command.version_number {
            Some(raw) => VersionNumber::parse(raw)?,
            None => match self
                .repo
                .find_latest_version(&tenant_id, &template_id)
                .await?
            {
                Some(latest) => latest.version_number.bump(VersionIncrement::Minor),
                None => VersionNumber::initial(),
            },
        };

        if self
            .repo
            .find_by_version_number(&tenant_id, &template_id, &version_number)
            .await?
            .is_some()
        {
            return Err(duplicate_error(&version_number, &template_id));
        }

        let validation = validate_version_content(&command.content);
        if !validation.is_valid {
            return Err(ApplicationError::invalid_request(validation.errors.clone()));
        }
        warnings.extend(validation.warnings.iter().cloned());

        let based_on = match &command.based_on_version {
            Some(raw) => {
                let base_number = VersionNumber::parse(raw)?;
                let base = self
                    .repo
                    .find_by_version_number(&tenant_id, &template_id, &base_number)
                    .await?
                    .ok_or_else(|| {
                        ApplicationError::validation(format!(
                            "base version {raw} not found for template {template_id}"
                        ))
                    })?;
                Some(base.version_number.to_string())
            }
            None => None,
        };

        let now = self.clock.now();
        let publish_now = command.auto_publish && command.skip_approval;
        let author = VersionAuthor {
            user_id: command.author_id.clone(),
            name: command.author_name.clone(),
            role: command.author_role.clone(),
            contributions: vec![AuthorContribution {
                description: format!("Created version {version_number}"),
                timestamp: now,
            }],
            statistics: AuthorStatistics {
                versions_created: 1,
                versions_published: u64::from(publish_now),
            },
        };
        let changelog = vec![ChangelogEntry::creation_entry(
            based_on.as_deref(),
            command.author_name.clone(),
            now,
        )];

        let new_version = NewTemplateVersion {
            tenant_id,
            template_id: template_id.clone(),
            template_type: command.template_type.clone(),
            version_number: version_number.clone(),
            status: if command.skip_approval {
                VersionStatus::Approved
            } else {
                VersionStatus::Draft
            },
            title: command.title.trim().to_owned(),
            description: command.description.trim().to_owned(),
            content: command.content,
            changelog,
            author,
            approval: if command.skip_approval {
                ApprovalWorkflow::auto_approved()
            } else {
                ApprovalWorkflow::standard()
            },
            deployment: Default::default(),
            lifecycle: Default::default(),
            compatibility: Default::default(),
            dependencies: Vec::new(),
            assets: Vec::new(),
            metadata: Default::default(),
            tags: command.tags,
            is_active: true,
            is_published: publish_now,
            is_deprecated: false,
            created_at: now,
            updated_at: now,
            published_at: publish_now.then_some(now),
            deprecated_at: None,
        };

        // `create` is the final authority on uniqueness; a lost race surfaces
        // as the same "already exists" error the pre-check produces.
        let created = match self.repo.create(new_version).await {
            Ok(version) => version,
            Err(DomainError::Conflict(_)) => {
                return Err(duplicate_error(&version_number, &template_id));
            }
            Err(other) => return Err(other.into()),
        };

        tracing::debug!(
            version = %created.version_number,
            template_id = %created.template_id,
            status = %created.status,
            "template version created"
        );

        let version_score = calculate_version_score(&created);
        let next_steps = next_steps(command.skip_approval, publish_now, &warnings);

        Ok(CreatedVersionDto {
            version: created.into(),
            version_score,
            validation,
            next_steps,
            warnings,
        })
    }
}

fn validate_request(
    command: &CreateVersionCommand,
    warnings: &mut Vec<String>,
) -> ApplicationResult<()> {
    let mut errors = Vec::new();

    if command.tenant_id.trim().is_empty() {
        errors.push("tenant id is required".to_owned());
    }
    if command.template_id.trim().is_empty() {
        errors.push("template id is required".to_owned());
    }
    if command.template_type.trim().is_empty() {
        errors.push("template type is required".to_owned());
    }
    let title = command.title.trim();
    if title.is_empty() {
        errors.push("title is required".to_owned());
    } else if title.chars().count() < MIN_TITLE_LENGTH {
        errors.push(format!(
            "title must be at least {MIN_TITLE_LENGTH} characters long"
        ));
    }
    let description = command.description.trim();
    if description.is_empty() {
        errors.push("description is required".to_owned());
    } else if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        warnings.push(format!(
            "description is shorter than {MIN_DESCRIPTION_LENGTH} characters; consider expanding it"
        ));
    }
    if command.author_id.trim().is_empty() {
        errors.push("author id is required".to_owned());
    }
    if command.author_name.trim().is_empty() {
        errors.push("author name is required".to_owned());
    }
    if command.author_role.trim().is_empty() {
        errors.push("author role is required".to_owned());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::invalid_request(errors))
    }
}

fn duplicate_error(version_number: &VersionNumber, template_id: &TemplateId) -> ApplicationError {
    ApplicationError::conflict(format!(
        "version {version_number} already exists for template {template_id}"
    ))
}

fn next_steps(skip_approval: bool, published: bool, warnings: &[String]) -> Vec<String> {
    let mut steps = Vec::new();
    if skip_approval {
        if published {
            steps.push("Version is published and ready for deployment".to_owned());
        } else {
            steps.push("Version is approved and ready for publishing".to_owned());
        }
    } else {
        steps.push("Submit the version for the approval workflow".to_owned());
    }
    if !warnings.is_empty() {
        steps.push("Review validation warnings before proceeding".to_owned());
    }
    steps.push("Run comprehensive testing against the new version".to_owned());
    steps.push("Monitor performance and user feedback after rollout".to_owned());
    steps
}
