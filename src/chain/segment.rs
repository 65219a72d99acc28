// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use super::ContentAddress;
use crate::errors::CycleError;
use crate::language::Language;

/// What a raw path segment turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Unit,
    Alias,
    ContentAddress,
    Parameter,
}

impl SegmentKind {
    pub fn is_executable(self) -> bool {
        !matches!(self, Self::Parameter)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Alias => "alias",
            Self::ContentAddress => "content_address",
            Self::Parameter => "parameter",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered alias names visited while resolving one segment. A name appears at
/// most once; pushing a repeat reports the cycle instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AliasChain(Vec<String>);

impl AliasChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: &str) -> Result<(), CycleError> {
        if self.contains(name) {
            let mut chain = self.0.clone();
            chain.push(name.to_string());
            return Err(CycleError { chain });
        }
        self.0.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|visited| visited == name)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Source text ready to hand to an invoker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    /// Unit name or content address the source was found under.
    pub target: String,
    pub source: Arc<str>,
    pub language: Language,
}

/// How a segment was resolved. Parameters carry none of this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<ContentAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "AliasChain::is_empty")]
    pub alias_chain: AliasChain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// One `/`-delimited token of a chain address after classification.
///
/// Created once by the classifier and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    raw: String,
    index: usize,
    kind: SegmentKind,
    metadata: ResolutionMetadata,
    executable: Option<Executable>,
}

impl PathSegment {
    pub(crate) fn parameter(index: usize, raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            index,
            kind: SegmentKind::Parameter,
            metadata: ResolutionMetadata::default(),
            executable: None,
        }
    }

    pub(crate) fn resolved(
        index: usize,
        raw: &str,
        kind: SegmentKind,
        executable: Executable,
        mut metadata: ResolutionMetadata,
    ) -> Self {
        metadata.language = Some(executable.language);
        metadata.target = Some(executable.target.clone());
        Self {
            raw: raw.to_string(),
            index,
            kind,
            metadata,
            executable: Some(executable),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn metadata(&self) -> &ResolutionMetadata {
        &self.metadata
    }

    pub fn executable(&self) -> Option<&Executable> {
        self.executable.as_ref()
    }

    pub fn is_parameter(&self) -> bool {
        self.kind == SegmentKind::Parameter
    }
}
