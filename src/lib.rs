//! Template version domain core: the `TemplateVersion` aggregate, semantic
//! version math, breaking-change analysis, quality scoring, migration
//! planning, and the two use-cases that drive version creation and history
//! retrieval. Transport and real persistence live outside this crate; both
//! plug in through `application` services and the
//! [`domain::version::TemplateVersionRepository`] trait.

pub mod application;
pub mod domain;
pub mod infrastructure;
