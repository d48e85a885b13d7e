//! # rig_core
//!
//! Command pipelines and remote template management for rig.
//!
//! - [`Pipeline`] validates local input documents, breaks them out into
//!   template sets and renders single-document builds
//! - [`TemplateRepository`] keeps cached clones of remote template
//!   repositories current and checks out template versions
//! - [`Installer`] records a remote template in a project's `rig.yaml` and
//!   renders it later
//!
//! Git access goes through the [`GitClient`] trait; [`GitOps`] shells out to
//! the `git` binary.

pub mod cache;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod git;
pub mod installer;
pub mod pipeline;
pub mod repository;
pub mod uri;

pub use cache::TemplateCache;
pub use context::{Cluster, RenderContext};
pub use descriptor::{parse_parameters, RigDescriptor};
pub use error::{RigError, RigResult};
pub use git::{GitClient, GitOps};
pub use installer::{InstallRequest, Installer};
pub use pipeline::{inject_build_fields, BreakoutRequest, Outcome, Pipeline};
pub use repository::{TemplateRepository, DEFAULT_BRANCH};
pub use uri::{RemoteRepo, TemplateUri};
