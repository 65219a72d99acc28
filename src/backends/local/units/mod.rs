// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod change_text_case;
pub mod echo;
pub mod prefix_suffix_adder;
pub mod reverse_text;
pub mod word_count;

pub use change_text_case::*;
pub use echo::*;
pub use prefix_suffix_adder::*;
pub use reverse_text::*;
pub use word_count::*;

use crate::chain::{ExecutionResult, Phase, UnitInput};

/// Apply a text transformation the way the built-in transformers do.
///
/// A single call transforms the request. In a circuit the request phase
/// forwards the request unchanged and the response phase transforms the
/// response it receives.
pub(crate) fn transform_text(phase: Phase, input: &UnitInput, transform: impl Fn(&str) -> String) -> ExecutionResult {
    let target = match (phase, &input.response) {
        (Phase::Request, _) => return pass_through(input),
        (Phase::Response, Some(response)) => response,
        _ => &input.request,
    };

    match std::str::from_utf8(&target.body) {
        Ok(text) => ExecutionResult::ok(transform(text)),
        Err(e) => ExecutionResult::failed(400, format!("Invalid UTF-8 input: {}", e)),
    }
}

/// Forward the request untouched, keeping its content type.
pub(crate) fn pass_through(input: &UnitInput) -> ExecutionResult {
    let result = ExecutionResult::ok(input.request.body.clone());
    match &input.request.content_type {
        Some(content_type) => result.with_content_type(content_type.clone()),
        None => result,
    }
}
