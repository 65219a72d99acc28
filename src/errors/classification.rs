// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for segments that cannot be resolved into something executable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassificationError {
    /// The segment looks like a content address but does not fit the grammar.
    #[error("Segment {index} ('{segment}') is not a valid content address: {reason}")]
    AddressFormat {
        index: usize,
        segment: String,
        reason: String,
    },

    /// A content address carries a data extension where execution is required.
    #[error("Segment {index} ('{segment}') uses data extension '.{extension}' where an executable is required")]
    DataExtension {
        index: usize,
        segment: String,
        extension: String,
    },

    /// A content address carries an extension missing from the language table.
    #[error("Segment {index} ('{segment}') uses unrecognized extension '.{extension}'")]
    UnrecognizedExtension {
        index: usize,
        segment: String,
        extension: String,
    },

    /// A well-formed content address with nothing stored under it.
    #[error("Segment {index} ('{segment}') references content '{address}' which does not exist")]
    ContentNotFound {
        index: usize,
        segment: String,
        address: String,
    },

    /// An alias whose terminal target is neither an enabled unit nor a content address.
    #[error("Segment {index} ('{segment}') is an alias for '{target}', which is not executable")]
    DanglingAlias {
        index: usize,
        segment: String,
        target: String,
    },
}

impl ClassificationError {
    /// Position index of the offending segment.
    pub fn index(&self) -> usize {
        match self {
            Self::AddressFormat { index, .. }
            | Self::DataExtension { index, .. }
            | Self::UnrecognizedExtension { index, .. }
            | Self::ContentNotFound { index, .. }
            | Self::DanglingAlias { index, .. } => *index,
        }
    }
}
