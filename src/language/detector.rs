// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Language detection from an explicit extension and/or source text.
//!
//! Signals are consulted in a fixed order and the first one that answers wins:
//!
//! 1. **Explicit extension**: looked up case-insensitively in [`EXTENSIONS`].
//!    An explicit extension is final: an unknown one is an error, never a hint
//!    to try the heuristics instead.
//! 2. **Shebang**: the interpreter named on a leading `#!` line, with
//!    `/usr/bin/env` unwrapped and version suffixes (`python3.12`) ignored.
//! 3. **Content heuristics**: per-language marker checks, tried in
//!    [`HEURISTICS`] order; a language needs [`MIN_MARKER_HITS`] distinct
//!    markers to claim the source.
//! 4. **Default**: [`DEFAULT_LANGUAGE`] unless the detector was built with
//!    another fallback.
//!
//! Detection is pure: the same inputs always produce the same answer.

use super::Language;
use crate::errors::LanguageError;

/// Fallback language when no signal is present.
pub const DEFAULT_LANGUAGE: Language = Language::Python;

/// Minimum number of distinct markers a language needs to win on heuristics.
pub const MIN_MARKER_HITS: usize = 2;

/// Executable extensions.
pub const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("sh", Language::Bash),
    ("bash", Language::Bash),
    ("js", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("rb", Language::Ruby),
    ("clj", Language::Clojure),
    ("cljs", Language::ClojureScript),
];

/// Extensions for data formats. Recognised, but never executable.
pub const DATA_EXTENSIONS: &[&str] = &[
    "json", "txt", "html", "htm", "md", "csv", "xml", "yaml", "yml", "css", "svg", "png", "jpg",
    "jpeg", "gif",
];

/// Shebang interpreter names, checked in this order.
const SHEBANG_MARKERS: &[(Language, &[&str])] = &[
    (Language::TypeScript, &["ts-node", "deno", "tsx"]),
    (Language::JavaScript, &["node", "nodejs", "bun"]),
    (Language::Python, &["python", "pypy"]),
    (Language::Ruby, &["ruby"]),
    (Language::Bash, &["bash", "sh", "zsh", "dash"]),
    (Language::Clojure, &["bb", "clojure", "clj"]),
];

/// One structural check against the source text.
#[derive(Debug, Clone, Copy)]
enum Marker {
    /// Substring anywhere in the source.
    Token(&'static str),
    /// Some line, leading whitespace removed, starts with this.
    LineStart(&'static str),
    /// Some line, trailing whitespace removed, ends with this.
    LineEnd(&'static str),
    /// Some line, trimmed, is exactly this.
    Line(&'static str),
}

impl Marker {
    fn matches(self, source: &str) -> bool {
        match self {
            Marker::Token(token) => source.contains(token),
            Marker::LineStart(prefix) => source.lines().any(|l| l.trim_start().starts_with(prefix)),
            Marker::LineEnd(suffix) => source.lines().any(|l| l.trim_end().ends_with(suffix)),
            Marker::Line(exact) => source.lines().any(|l| l.trim() == exact),
        }
    }
}

/// Heuristic markers per language, in priority order.
///
/// Languages with the most distinctive syntax go first so that shared tokens
/// (`import`, `def`, `export`) cannot drag a file into the wrong bucket.
const HEURISTICS: &[(Language, &[Marker])] = &[
    (
        Language::TypeScript,
        &[
            Marker::Token(": string"),
            Marker::Token(": number"),
            Marker::Token(": boolean"),
            Marker::LineStart("interface "),
            Marker::LineStart("export interface "),
            Marker::Token("import type "),
            Marker::Token(" as const"),
            Marker::Token("): Promise<"),
        ],
    ),
    (
        Language::Clojure,
        &[
            Marker::LineStart("(ns "),
            Marker::LineStart("(defn "),
            Marker::LineStart("(def "),
            Marker::LineStart("(require "),
            Marker::Token("(let ["),
            Marker::Token("(fn ["),
        ],
    ),
    (
        Language::Python,
        &[
            Marker::LineStart("def "),
            Marker::LineStart("import "),
            Marker::LineStart("from "),
            Marker::LineStart("elif "),
            Marker::LineEnd("):"),
            Marker::Token("print("),
            Marker::Token("self."),
            Marker::Token("None"),
            Marker::Token("__name__"),
        ],
    ),
    (
        Language::Ruby,
        &[
            Marker::LineStart("def "),
            Marker::Line("end"),
            Marker::LineStart("puts "),
            Marker::LineStart("require '"),
            Marker::LineStart("require \""),
            Marker::Token(" do |"),
            Marker::LineStart("elsif "),
        ],
    ),
    (
        Language::JavaScript,
        &[
            Marker::LineStart("function "),
            Marker::LineStart("const "),
            Marker::LineStart("let "),
            Marker::LineStart("export "),
            Marker::Token("=> "),
            Marker::Token("console.log"),
            Marker::Token("module.exports"),
            Marker::Token("require("),
            Marker::Token("==="),
        ],
    ),
    (
        Language::Bash,
        &[
            Marker::LineStart("echo "),
            Marker::LineStart("if ["),
            Marker::LineStart("export "),
            Marker::Line("fi"),
            Marker::Line("done"),
            Marker::Line("esac"),
            Marker::Token("$1"),
            Marker::Token("${"),
        ],
    ),
];

fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}

/// Returns true when the extension names a data format.
pub fn is_data_extension(extension: &str) -> bool {
    let normalized = normalize_extension(extension);
    DATA_EXTENSIONS.contains(&normalized.as_str())
}

/// Returns true when the extension maps to an executable language.
pub fn is_language_extension(extension: &str) -> bool {
    let normalized = normalize_extension(extension);
    EXTENSIONS.iter().any(|(ext, _)| *ext == normalized)
}

/// Map an explicit extension (with or without the leading dot) to a language.
pub fn language_for_extension(extension: &str) -> Result<Language, LanguageError> {
    let normalized = normalize_extension(extension);

    if let Some((_, language)) = EXTENSIONS.iter().find(|(ext, _)| *ext == normalized) {
        return Ok(*language);
    }

    if DATA_EXTENSIONS.contains(&normalized.as_str()) {
        Err(LanguageError::DataExtension {
            extension: normalized,
        })
    } else {
        Err(LanguageError::UnrecognizedExtension {
            extension: normalized,
        })
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn from_shebang(source: &str) -> Option<Language> {
    let first_line = source.lines().next()?;
    let command = first_line.strip_prefix("#!")?.trim();
    let mut parts = command.split_whitespace();

    let mut interpreter = basename(parts.next()?);
    if interpreter == "env" {
        // `#!/usr/bin/env -S deno run` names the interpreter after the flags
        interpreter = basename(parts.find(|part| !part.starts_with('-'))?);
    }

    let name = interpreter.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');

    SHEBANG_MARKERS
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map(|(language, _)| *language)
}

fn from_heuristics(source: &str) -> Option<Language> {
    HEURISTICS
        .iter()
        .find(|(_, markers)| {
            markers.iter().filter(|marker| marker.matches(source)).count() >= MIN_MARKER_HITS
        })
        .map(|(language, _)| *language)
}

/// Language detector with a configurable fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDetector {
    default: Language,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl LanguageDetector {
    pub fn new(default: Language) -> Self {
        Self { default }
    }

    pub fn default_language(&self) -> Language {
        self.default
    }

    /// Detect the language of `source_text`, honouring `explicit_extension`
    /// unconditionally when present.
    pub fn detect(
        &self,
        explicit_extension: Option<&str>,
        source_text: &str,
    ) -> Result<Language, LanguageError> {
        if let Some(extension) = explicit_extension {
            return language_for_extension(extension);
        }

        Ok(from_shebang(source_text)
            .or_else(|| from_heuristics(source_text))
            .unwrap_or(self.default))
    }
}

/// Detect with the built-in default fallback.
pub fn detect(explicit_extension: Option<&str>, source_text: &str) -> Result<Language, LanguageError> {
    LanguageDetector::default().detect(explicit_extension, source_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_extension_beats_everything() {
        let sources = [
            "",
            "#!/usr/bin/env node\nconsole.log('hi')",
            "(ns demo)\n(defn main [x] x)",
            "echo $1\nfi",
        ];

        for source in sources {
            assert_eq!(detect(Some(".py"), source), Ok(Language::Python));
            assert_eq!(detect(Some("py"), source), Ok(Language::Python));
            assert_eq!(detect(Some("PY"), source), Ok(Language::Python));
        }
    }

    #[test]
    fn test_extension_table() {
        struct TestCase {
            extension: &'static str,
            expected: Result<Language, LanguageError>,
        }

        let test_cases = vec![
            TestCase { extension: "sh", expected: Ok(Language::Bash) },
            TestCase { extension: ".Bash", expected: Ok(Language::Bash) },
            TestCase { extension: "mjs", expected: Ok(Language::JavaScript) },
            TestCase { extension: "ts", expected: Ok(Language::TypeScript) },
            TestCase { extension: "rb", expected: Ok(Language::Ruby) },
            TestCase { extension: "clj", expected: Ok(Language::Clojure) },
            TestCase { extension: "CLJS", expected: Ok(Language::ClojureScript) },
            TestCase {
                extension: "json",
                expected: Err(LanguageError::DataExtension { extension: "json".into() }),
            },
            TestCase {
                extension: ".HTML",
                expected: Err(LanguageError::DataExtension { extension: "html".into() }),
            },
            TestCase {
                extension: "exe",
                expected: Err(LanguageError::UnrecognizedExtension { extension: "exe".into() }),
            },
        ];

        for test_case in test_cases {
            assert_eq!(
                detect(Some(test_case.extension), "print('x')"),
                test_case.expected,
                "extension '{}'",
                test_case.extension
            );
        }
    }

    #[test]
    fn test_unrecognized_extension_does_not_fall_through() {
        // Source is unmistakably Python, but the explicit extension is final.
        let result = detect(Some("zzz"), "#!/usr/bin/python3\ndef main():\n    pass\n");
        assert!(matches!(result, Err(LanguageError::UnrecognizedExtension { .. })));
    }

    #[test]
    fn test_shebang_detection() {
        let test_cases = vec![
            ("#!/usr/bin/python3\nx = 1", Language::Python),
            ("#!/usr/bin/env python3.12\nx = 1", Language::Python),
            ("#!/bin/bash\nls", Language::Bash),
            ("#!/bin/sh\nls", Language::Bash),
            ("#!/usr/bin/env node\nfoo()", Language::JavaScript),
            ("#!/usr/bin/env -S deno run\nfoo()", Language::TypeScript),
            ("#!/usr/bin/env ts-node\nfoo()", Language::TypeScript),
            ("#!/usr/bin/env ruby\nfoo", Language::Ruby),
            ("#!/usr/bin/env bb\n(println 1)", Language::Clojure),
        ];

        for (source, expected) in test_cases {
            assert_eq!(detect(None, source), Ok(expected), "source: {:?}", source);
        }
    }

    #[test]
    fn test_shebang_beats_heuristics() {
        // Body reads like Python, shebang says bash
        let source = "#!/bin/bash\ndef main(x):\n    print(x)\n";
        assert_eq!(detect(None, source), Ok(Language::Bash));
    }

    #[test]
    fn test_unknown_shebang_falls_through_to_heuristics() {
        let source = "#!/opt/custom/interp\nfunction main() {}\nconsole.log('x')\n";
        assert_eq!(detect(None, source), Ok(Language::JavaScript));
    }

    #[test]
    fn test_content_heuristics() {
        let test_cases = vec![
            ("def main(request):\n    return request\n", Language::Python),
            ("import json\nprint(json.dumps({}))\n", Language::Python),
            ("def main(input)\n  puts input\nend\n", Language::Ruby),
            (
                "function main(request, response) {\n  console.log(request);\n}\n",
                Language::JavaScript,
            ),
            (
                "export function main(request: string): string {\n  return request;\n}\ninterface Foo {}\n",
                Language::TypeScript,
            ),
            ("(ns handler)\n(defn main [request] request)\n", Language::Clojure),
            ("echo \"$1\"\nif [ -n \"$2\" ]; then\n  echo hi\nfi\n", Language::Bash),
        ];

        for (source, expected) in test_cases {
            assert_eq!(detect(None, source), Ok(expected), "source: {:?}", source);
        }
    }

    #[test]
    fn test_single_marker_is_not_enough() {
        assert_eq!(detect(None, "import something"), Ok(DEFAULT_LANGUAGE));
        let detector = LanguageDetector::new(Language::Bash);
        assert_eq!(detector.detect(None, "import something"), Ok(Language::Bash));
    }

    #[test]
    fn test_default_fallback() {
        let detector = LanguageDetector::new(Language::Ruby);
        assert_eq!(detector.detect(None, ""), Ok(Language::Ruby));
        assert_eq!(detector.detect(None, "hello world"), Ok(Language::Ruby));
    }

    #[test]
    fn test_detection_is_idempotent() {
        let source = "const x = 1;\nconsole.log(x);\n";
        let first = detect(None, source);
        for _ in 0..5 {
            assert_eq!(detect(None, source), first);
        }
    }

    #[test]
    fn test_extension_helpers() {
        assert!(is_data_extension(".JSON"));
        assert!(!is_data_extension("py"));
        assert!(is_language_extension("Py"));
        assert!(!is_language_extension("txt"));
    }
}
