// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Implementation languages and how they are recognised.
//!
//! A unit's language comes from, in order: an explicit extension, a shebang
//! line, content heuristics, and finally a default. See [`detector`].
//! Whether a unit can sit in the middle of a circuit depends on its entry
//! point signature; see [`convention`].

pub mod convention;
pub mod detector;

pub use convention::{detect_convention, CallingConvention};
pub use detector::{detect, LanguageDetector};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interpreted languages a unit may be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Bash,
    JavaScript,
    TypeScript,
    Ruby,
    Clojure,
    ClojureScript,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Bash => "bash",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Ruby => "ruby",
            Language::Clojure => "clojure",
            Language::ClojureScript => "clojurescript",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Language {
    fn default() -> Self {
        detector::DEFAULT_LANGUAGE
    }
}
