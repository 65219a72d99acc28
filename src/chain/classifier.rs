// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Segment classification.
//!
//! Each raw segment is tried against the following, in order, and the first
//! match decides its kind:
//!
//! 1. an enabled unit with exactly that name
//! 2. an alias, followed to a unit or content address
//! 3. either of the above written as `name.ext` with a language extension,
//!    which then only steers language detection
//! 4. content-address syntax, with an optional `.ext` language hint
//! 5. otherwise, a parameter
//!
//! A stem in the address alphabet with a language extension that matches
//! none of these is reported as a malformed address, so a literal parameter
//! such as `main.py` is rejected rather than passed through.
//!
//! Classification reads registries and never mutates them, so it yields the
//! same answer for the same segment every time.

use std::sync::Arc;

use super::content::{is_address_alphabet, split_extension};
use super::{
    AliasResolver, ContentAddress, Executable, PathSegment, ResolutionMetadata, SegmentKind,
};
use crate::config::consts::CONTENT_ADDRESS_LENGTH;
use crate::errors::{ChainError, ClassificationError, LanguageError};
use crate::language::detector::is_language_extension;
use crate::language::LanguageDetector;
use crate::observability::messages::classification::{AliasResolved, SegmentClassified};
use crate::observability::messages::StructuredLog;
use crate::traits::{Registries, UnitRecord};

pub struct SegmentClassifier<'a> {
    registries: &'a Registries,
    detector: LanguageDetector,
    max_alias_depth: usize,
}

impl<'a> SegmentClassifier<'a> {
    pub fn new(registries: &'a Registries, detector: LanguageDetector, max_alias_depth: usize) -> Self {
        Self {
            registries,
            detector,
            max_alias_depth,
        }
    }

    pub fn classify(&self, index: usize, raw: &str) -> Result<PathSegment, ChainError> {
        let segment = self.classify_inner(index, raw)?;
        SegmentClassified {
            index,
            segment: raw,
            kind: segment.kind(),
            language: segment.metadata().language,
        }
        .log();
        Ok(segment)
    }

    fn classify_inner(&self, index: usize, raw: &str) -> Result<PathSegment, ChainError> {
        if let Some(segment) = self.named(index, raw, raw, None)? {
            return Ok(segment);
        }

        // `name.ext` on a unit or alias only hints the language
        if let (stem, Some(extension)) = split_extension(raw) {
            if is_language_extension(extension) {
                if let Some(segment) = self.named(index, raw, stem, Some(extension))? {
                    return Ok(segment);
                }
            }
        }

        if let Some((executable, metadata)) = self.content_address(index, raw, raw, None)? {
            return Ok(PathSegment::resolved(
                index,
                raw,
                SegmentKind::ContentAddress,
                executable,
                metadata,
            ));
        }

        Ok(PathSegment::parameter(index, raw))
    }

    /// Look `name` up as an enabled unit, then as an alias. `Ok(None)` means
    /// it is neither. `hint` is an explicit extension taken from the segment.
    fn named(
        &self,
        index: usize,
        raw: &str,
        name: &str,
        hint: Option<&str>,
    ) -> Result<Option<PathSegment>, ChainError> {
        if let Some(unit) = self.enabled_unit(name) {
            let executable = self.unit_executable(index, raw, name, unit, hint)?;
            return Ok(Some(PathSegment::resolved(
                index,
                raw,
                SegmentKind::Unit,
                executable,
                hinted(hint),
            )));
        }

        let resolver = AliasResolver::new(self.registries.aliases.as_ref(), self.max_alias_depth);
        if !resolver.is_alias(name) {
            return Ok(None);
        }

        let resolved = resolver
            .resolve(name)
            .map_err(|e| ChainError::from_alias(index, e))?;
        AliasResolved {
            alias: name,
            terminal: &resolved.terminal,
            hops: resolved.chain.len(),
        }
        .log();

        let (executable, mut metadata) = if let Some(unit) = self.enabled_unit(&resolved.terminal) {
            (
                self.unit_executable(index, raw, &resolved.terminal, unit, hint)?,
                hinted(hint),
            )
        } else if let Some(found) = self.content_address(index, raw, &resolved.terminal, hint)? {
            found
        } else {
            return Err(ClassificationError::DanglingAlias {
                index,
                segment: raw.to_string(),
                target: resolved.terminal,
            }
            .into());
        };

        metadata.alias_chain = resolved.chain;
        Ok(Some(PathSegment::resolved(
            index,
            raw,
            SegmentKind::Alias,
            executable,
            metadata,
        )))
    }

    fn enabled_unit(&self, name: &str) -> Option<&UnitRecord> {
        self.registries
            .units
            .lookup_unit(name)
            .filter(|unit| unit.enabled)
    }

    fn unit_executable(
        &self,
        index: usize,
        raw: &str,
        name: &str,
        unit: &UnitRecord,
        hint: Option<&str>,
    ) -> Result<Executable, ChainError> {
        let language = match (hint, unit.language) {
            (None, Some(language)) => language,
            _ => self
                .detector
                .detect(hint, &unit.source)
                .map_err(|e| language_error(index, raw, e))?,
        };

        Ok(Executable {
            target: name.to_string(),
            source: Arc::from(unit.source.as_str()),
            language,
        })
    }

    /// Try `token` as a content address. `Ok(None)` means it does not look
    /// like one at all; `raw` is the segment text used in errors. `hint`
    /// takes precedence over an extension carried by `token` itself.
    fn content_address(
        &self,
        index: usize,
        raw: &str,
        token: &str,
        hint: Option<&str>,
    ) -> Result<Option<(Executable, ResolutionMetadata)>, ChainError> {
        let (stem, own_extension) = split_extension(token);
        if !is_address_alphabet(stem) {
            return Ok(None);
        }

        if stem.len() != CONTENT_ADDRESS_LENGTH {
            // Only an address-alphabet stem with a language extension is close
            // enough to an address to be reported as a malformed one.
            return match own_extension {
                Some(extension) if is_language_extension(extension) => {
                    Err(ClassificationError::AddressFormat {
                        index,
                        segment: raw.to_string(),
                        reason: format!(
                            "expected {} characters, found {}",
                            CONTENT_ADDRESS_LENGTH,
                            stem.len()
                        ),
                    }
                    .into())
                }
                _ => Ok(None),
            };
        }

        let extension = hint.or(own_extension);
        let address = ContentAddress::parse(stem).map_err(|reason| ClassificationError::AddressFormat {
            index,
            segment: raw.to_string(),
            reason,
        })?;

        let content = self.registries.contents.lookup(&address).ok_or_else(|| {
            ClassificationError::ContentNotFound {
                index,
                segment: raw.to_string(),
                address: address.to_string(),
            }
        })?;
        let source = String::from_utf8_lossy(content);

        let language = self
            .detector
            .detect(extension, &source)
            .map_err(|e| language_error(index, raw, e))?;

        let executable = Executable {
            target: address.to_string(),
            source: Arc::from(source.as_ref()),
            language,
        };
        let metadata = ResolutionMetadata {
            address: Some(address),
            extension: extension.map(str::to_string),
            ..ResolutionMetadata::default()
        };
        Ok(Some((executable, metadata)))
    }
}

fn hinted(hint: Option<&str>) -> ResolutionMetadata {
    ResolutionMetadata {
        extension: hint.map(str::to_string),
        ..ResolutionMetadata::default()
    }
}

fn language_error(index: usize, raw: &str, error: LanguageError) -> ChainError {
    let segment = raw.to_string();
    match error {
        LanguageError::UnrecognizedExtension { extension } => ClassificationError::UnrecognizedExtension {
            index,
            segment,
            extension,
        },
        LanguageError::DataExtension { extension } => ClassificationError::DataExtension {
            index,
            segment,
            extension,
        },
    }
    .into()
}
