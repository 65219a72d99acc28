// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Data crossing the invocation boundary.

use serde::Serialize;
use std::borrow::Cow;

/// A body plus its optional content type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payload {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl Payload {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Lossy UTF-8 view of the body.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Everything one invocation of a unit receives.
///
/// `response` is present only in the response phase of a circuit; its
/// presence is what tells a two-phase unit which phase it is in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitInput {
    pub request: Payload,
    pub parameters: Vec<String>,
    pub response: Option<Payload>,
}

impl UnitInput {
    /// Input for a single invocation or a request phase.
    pub fn request(request: Payload, parameters: Vec<String>) -> Self {
        Self {
            request,
            parameters,
            response: None,
        }
    }

    /// Input for a response phase.
    pub fn response(request: Payload, parameters: Vec<String>, response: Payload) -> Self {
        Self {
            request,
            parameters,
            response: Some(response),
        }
    }

    pub fn is_response_phase(&self) -> bool {
        self.response.is_some()
    }
}

/// What a unit hands back from one invocation.
///
/// `output` is mandatory on success: a unit that wants to pass its input
/// through unchanged must return it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub output: Option<Vec<u8>>,
    pub content_type: Option<String>,
    pub status: u16,
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn ok(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: Some(output.into()),
            content_type: None,
            status: 200,
            error: None,
        }
    }

    pub fn failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            output: None,
            content_type: None,
            status,
            error: Some(message.into()),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Fill in a missing content type from the payload this result answers.
    pub fn inherit_content_type(mut self, inherited: Option<String>) -> Self {
        if self.content_type.is_none() {
            self.content_type = inherited;
        }
        self
    }

    pub fn body(&self) -> &[u8] {
        self.output.as_deref().unwrap_or_default()
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.body())
    }

    /// Turn the result into the payload handed to the next invocation.
    pub fn into_payload(self) -> Payload {
        Payload {
            body: self.output.unwrap_or_default(),
            content_type: self.content_type,
        }
    }
}
