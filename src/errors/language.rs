// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while mapping an explicit extension to a language.
///
/// Heuristic detection never fails; only an explicit extension can, because
/// an explicit extension is never allowed to fall through to heuristics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The extension is not in the extension table at all.
    #[error("Unrecognized extension '.{extension}'")]
    UnrecognizedExtension { extension: String },

    /// The extension names a data format, which cannot be executed.
    #[error("Extension '.{extension}' denotes a data format and cannot be executed")]
    DataExtension { extension: String },
}
