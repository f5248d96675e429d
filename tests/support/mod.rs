// tests/support/mod.rs
#![allow(dead_code)]

use std::sync::{Mutex, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use templar_core::application::commands::versions::CreateVersionCommandBuilder;
use templar_core::application::ports::time::Clock;
use templar_core::domain::version::content::{
    ContentSchema, TemplateVariable, VariableScope, VariableType, VersionContent,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static TRACING: Once = Once::new();

/// Installs the fmt subscriber once per test binary; `RUST_LOG` filters.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let env_filter = std::env::var("RUST_LOG")
            .ok()
            .unwrap_or_else(|| "info".to_string());
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::new(env_filter))
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init()
            .ok();
    });
}

/// Clock that only moves when a test advances it.
pub struct SteppingClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppingClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn epoch() -> Self {
        Self::starting_at(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += duration;
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn valid_content() -> VersionContent {
    VersionContent {
        schema: Some(ContentSchema {
            version: "1.0".to_owned(),
            schema_type: "email".to_owned(),
            format: "json".to_owned(),
            encoding: "utf-8".to_owned(),
            checksum: Some("5f3a".to_owned()),
            structure: serde_json::json!({"fields": ["subject", "body"]}),
        }),
        data: Some(serde_json::json!({"subject": "Welcome!", "body": "Hello {{name}}"})),
        variables: vec![TemplateVariable {
            name: "name".to_owned(),
            variable_type: Some(VariableType::String),
            scope: VariableScope::Template,
            required: false,
            value: None,
            description: Some("recipient display name".to_owned()),
        }],
        ..VersionContent::default()
    }
}

pub fn content_with_variables(names: &[(&str, VariableType)]) -> VersionContent {
    let mut content = valid_content();
    content.variables = names
        .iter()
        .map(|(name, variable_type)| TemplateVariable {
            name: (*name).to_owned(),
            variable_type: Some(*variable_type),
            scope: VariableScope::Template,
            required: false,
            value: None,
            description: None,
        })
        .collect();
    content
}

/// Builder pre-filled with a valid request for `tpl-1` in `tenant-a`.
pub fn base_command() -> CreateVersionCommandBuilder {
    CreateVersionCommandBuilder::default()
        .tenant_id("tenant-a")
        .template_id("tpl-1")
        .template_type("email")
        .title("Welcome email")
        .description("Initial welcome email template for new customers")
        .content(valid_content())
        .author("u-1", "alex", "developer")
}
