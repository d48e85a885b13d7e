//! Remote template URIs.
//!
//! Accepted form: `[scheme://][host/]owner/repo/template[#version]`. The
//! first segment is taken as a host only when it contains a dot; otherwise
//! the host defaults to `github.com`.

use std::fmt;

use regex::Regex;

use crate::error::{RigError, RigResult};

/// Host assumed when a URI names none.
pub const DEFAULT_HOST: &str = "github.com";

const URI_PATTERN: &str = r"^(?:[A-Za-z][A-Za-z0-9+.-]*://)?(?:(?P<host>[^/#]+\.[^/#]+)/)?(?P<owner>[^/#]+)/(?P<repo>[^/#]+)/(?P<template>[^#]+?)/?(?:#(?P<version>[^#]+))?$";

/// A git repository holding templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteRepo {
    pub host: String,
    pub owner: String,
    pub name: String,
}

impl RemoteRepo {
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// SSH clone address, e.g. `git@github.com:acme/templates`.
    pub fn ssh_url(&self) -> String {
        format!("git@{}:{}/{}", self.host, self.owner, self.name)
    }
}

impl fmt::Display for RemoteRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.host, self.owner, self.name)
    }
}

/// A parsed template reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateUri {
    pub repo: RemoteRepo,
    pub template: String,
    pub version: Option<String>,
}

impl TemplateUri {
    pub fn parse(input: &str) -> RigResult<Self> {
        let trimmed = input.trim();
        let pattern =
            Regex::new(URI_PATTERN).map_err(|e| RigError::InvalidTemplateUri(e.to_string()))?;
        let captures = pattern
            .captures(trimmed)
            .ok_or_else(|| RigError::InvalidTemplateUri(input.to_string()))?;

        let host = captures
            .name("host")
            .map(|m| m.as_str())
            .unwrap_or(DEFAULT_HOST);
        let template = captures["template"].trim_matches('/');
        if template.is_empty() {
            return Err(RigError::InvalidTemplateUri(input.to_string()));
        }

        Ok(Self {
            repo: RemoteRepo::new(host, &captures["owner"], &captures["repo"]),
            template: template.to_string(),
            version: captures.name("version").map(|m| m.as_str().to_string()),
        })
    }

    /// The `template` field stored in a rig descriptor.
    ///
    /// The host is omitted when it is the default one.
    pub fn descriptor_template(&self) -> String {
        if self.repo.host == DEFAULT_HOST {
            format!("{}/{}/{}", self.repo.owner, self.repo.name, self.template)
        } else {
            format!("{}/{}", self.repo, self.template)
        }
    }
}

impl fmt::Display for TemplateUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor_template())?;
        if let Some(version) = &self.version {
            write!(f, "#{}", version)?;
        }
        Ok(())
    }
}
