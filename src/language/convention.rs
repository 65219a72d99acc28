// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Calling convention detection.
//!
//! A unit supports two-phase chaining when its entry point (`main`) accepts a
//! parameter named `response`; the presence of that argument is what tells the
//! unit it is running its response phase. Shell units have no signature, so
//! they opt in by reading the `RESPONSE` variable.

use super::Language;
use serde::Serialize;

/// Name of the entry point parameter that marks two-phase support.
pub const RESPONSE_PARAMETER: &str = "response";

/// Environment variable shell units read during the response phase.
pub const RESPONSE_VARIABLE: &str = "RESPONSE";

/// How a unit expects to be called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallingConvention {
    /// Called once with a request; may only sit at a chain's tail in a circuit.
    SingleInvocation,
    /// Called with a request, and again later with the request plus a response.
    TwoPhase,
}

impl CallingConvention {
    #[inline]
    pub fn supports_chaining(self) -> bool {
        matches!(self, Self::TwoPhase)
    }
}

/// Entry point openers per language family, with the closing delimiter of the
/// parameter list.
fn entry_point_openers(language: Language) -> &'static [(&'static str, char)] {
    match language {
        Language::Python => &[("def main(", ')')],
        Language::Ruby => &[("def main(", ')')],
        Language::JavaScript | Language::TypeScript => &[
            ("function main(", ')'),
            ("main = async (", ')'),
            ("main = (", ')'),
        ],
        Language::Clojure | Language::ClojureScript => &[("(defn main [", ']')],
        Language::Bash => &[],
    }
}

/// Offset of the delimiter closing a list whose opener sits just before
/// `list`. Brackets nested inside default values are skipped.
fn closing_offset(list: &str, closer: char) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, c) in list.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth > 0 => depth -= 1,
            c if c == closer => return Some(offset),
            _ => {}
        }
    }
    None
}

/// Split a parameter list at commas and whitespace outside nested brackets.
fn top_level_tokens(list: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (offset, c) in list.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c == ',' || c.is_whitespace()) => {
                tokens.push(&list[start..offset]);
                start = offset + c.len_utf8();
            }
            _ => {}
        }
    }
    tokens.push(&list[start..]);
    tokens
}

fn parameter_names(list: &str) -> impl Iterator<Item = &str> {
    top_level_tokens(list)
        .into_iter()
        .map(|token| token.trim_start_matches(|c: char| c == '*' || c == '&'))
        .map(|token| {
            let end = token
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
                .unwrap_or(token.len());
            &token[..end]
        })
        .filter(|name| !name.is_empty())
}

/// Inspect `source` and report which calling convention its entry point uses.
pub fn detect_convention(language: Language, source: &str) -> CallingConvention {
    if language == Language::Bash {
        let reads_response = source.contains(&format!("${}", RESPONSE_VARIABLE))
            || source.contains(&format!("${{{}", RESPONSE_VARIABLE));
        return if reads_response {
            CallingConvention::TwoPhase
        } else {
            CallingConvention::SingleInvocation
        };
    }

    for (opener, closer) in entry_point_openers(language) {
        let Some(start) = source.find(opener) else {
            continue;
        };
        let params_start = start + opener.len();
        let params_end = closing_offset(&source[params_start..], *closer)
            .map(|offset| params_start + offset)
            .unwrap_or(source.len());

        if parameter_names(&source[params_start..params_end]).any(|name| name == RESPONSE_PARAMETER) {
            return CallingConvention::TwoPhase;
        }
        // The first entry point found is authoritative
        return CallingConvention::SingleInvocation;
    }

    CallingConvention::SingleInvocation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_phase_signatures() {
        let test_cases = vec![
            (Language::Python, "def main(request, response=None):\n    return response\n"),
            (Language::Python, "def main(\n    request,\n    response=None,\n):\n    pass\n"),
            (Language::Ruby, "def main(request, response = nil)\n  response\nend\n"),
            (Language::JavaScript, "function main(request, response) { return response; }"),
            (Language::JavaScript, "export const main = async (request, response) => response;"),
            (
                Language::TypeScript,
                "export function main(request: string, response?: string): string { return '' }",
            ),
            (Language::Python, "def main(request=dict(), response=None):\n    pass\n"),
            (Language::Python, "def main(request=(1, [2]), *, response=None):\n    pass\n"),
            (Language::Clojure, "(defn main [request response]\n  response)"),
            (Language::Bash, "if [ -n \"$RESPONSE\" ]; then echo \"$RESPONSE\"; fi"),
            (Language::Bash, "echo \"${RESPONSE:-$1}\""),
        ];

        for (language, source) in test_cases {
            assert_eq!(
                detect_convention(language, source),
                CallingConvention::TwoPhase,
                "{} source: {:?}",
                language,
                source
            );
        }
    }

    #[test]
    fn test_single_invocation_signatures() {
        let test_cases = vec![
            (Language::Python, "def main(request):\n    return request\n"),
            (Language::Python, "def main(request, responses=None):\n    pass\n"),
            (Language::Python, "def main(request=dict(response=None)):\n    pass\n"),
            (Language::Python, "print('no entry point at all')"),
            (Language::JavaScript, "function main(request) { return request; }"),
            (Language::Clojure, "(defn main [request] request)"),
            (Language::Bash, "echo \"$1\""),
        ];

        for (language, source) in test_cases {
            assert_eq!(
                detect_convention(language, source),
                CallingConvention::SingleInvocation,
                "{} source: {:?}",
                language,
                source
            );
        }
    }

    #[test]
    fn test_response_outside_entry_point_does_not_count() {
        let source = "def helper(response):\n    return response\n\ndef main(request):\n    return helper(request)\n";
        assert_eq!(
            detect_convention(Language::Python, source),
            CallingConvention::SingleInvocation
        );
    }

    #[test]
    fn test_supports_chaining() {
        assert!(CallingConvention::TwoPhase.supports_chaining());
        assert!(!CallingConvention::SingleInvocation.supports_chaining());
    }
}
