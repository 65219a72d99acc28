// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rendering a [`DebugTrace`] for the caller.
//!
//! The format comes from the extension on the chain's head segment:
//! `.json`, `.html` or `.txt`. The extension is stripped before the head is
//! classified. Without one, the trace is returned as a structured object.

use serde::Serialize;
use std::fmt::Write as _;

use super::DebugTrace;
use crate::chain::content::split_extension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugFormat {
    Structured,
    Json,
    Html,
    Text,
}

impl DebugFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "html" => Some(Self::Html),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "structured",
            Self::Json => "json",
            Self::Html => "html",
            Self::Text => "text",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Structured | Self::Json => "application/json",
            Self::Html => "text/html; charset=utf-8",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Strip a debug-format extension from the head segment.
pub fn split_format_extension(head: &str) -> (&str, DebugFormat) {
    match split_extension(head) {
        (stem, Some(extension)) => match DebugFormat::from_extension(extension) {
            Some(format) => (stem, format),
            None => (head, DebugFormat::Structured),
        },
        (_, None) => (head, DebugFormat::Structured),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTrace {
    pub body: Vec<u8>,
    pub content_type: &'static str,
}

pub fn render(trace: &DebugTrace, format: DebugFormat) -> Result<RenderedTrace, serde_json::Error> {
    let body = match format {
        DebugFormat::Structured => serde_json::to_vec(trace)?,
        DebugFormat::Json => serde_json::to_vec_pretty(trace)?,
        DebugFormat::Html => render_html(trace).into_bytes(),
        DebugFormat::Text => render_text(trace).into_bytes(),
    };
    Ok(RenderedTrace {
        body,
        content_type: format.content_type(),
    })
}

fn render_text(trace: &DebugTrace) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "mode: {}", trace.mode);

    let _ = writeln!(out, "\nsegments:");
    for segment in &trace.segments {
        let _ = write!(out, "  [{}] {} ({}", segment.index, segment.raw, segment.kind);
        if let Some(language) = segment.resolution.language {
            let _ = write!(out, ", {}", language);
        }
        if !segment.resolution.alias_chain.is_empty() {
            let _ = write!(out, ", via {}", segment.resolution.alias_chain.names().join(" -> "));
        }
        if let Some(target) = &segment.resolution.target {
            let _ = write!(out, ", target {}", target);
        }
        let _ = writeln!(out, ")");
    }

    let _ = writeln!(out, "\npositions:");
    for position in &trace.positions {
        let _ = writeln!(
            out,
            "  [{}] {} params={:?} state={}",
            position.index, position.segment, position.parameters, position.state
        );
    }

    let _ = writeln!(out, "\nphases:");
    for phase in &trace.phases {
        let _ = writeln!(
            out,
            "  #{} [{}] {} {}: request={:?}",
            phase.sequence, phase.position, phase.segment, phase.phase, phase.input.request
        );
        if let Some(response) = &phase.input.response {
            let _ = writeln!(out, "      response in={:?}", response);
        }
        if let Some(output) = &phase.output {
            let _ = writeln!(
                out,
                "      -> status={} output={:?}",
                output.status,
                output.output.as_deref().unwrap_or_default()
            );
        }
        if let Some(error) = &phase.error {
            let _ = writeln!(out, "      !! {}", error);
        }
    }

    match (&trace.result, &trace.error) {
        (_, Some(error)) => {
            let _ = writeln!(out, "\nerror ({}): {}", error.kind, error.message);
        }
        (Some(result), None) => {
            let _ = writeln!(
                out,
                "\nresult: status={} output={:?}",
                result.status,
                result.output.as_deref().unwrap_or_default()
            );
        }
        (None, None) => {}
    }
    out
}

fn render_html(trace: &DebugTrace) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} trace</title></head><body>\n",
        trace.mode
    );
    let _ = writeln!(out, "<h1>{} chain</h1>", trace.mode);

    let _ = writeln!(out, "<h2>Segments</h2>\n<table>");
    let _ = writeln!(out, "<tr><th>#</th><th>segment</th><th>kind</th><th>language</th><th>alias chain</th><th>target</th></tr>");
    for segment in &trace.segments {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            segment.index,
            escape_html(&segment.raw),
            segment.kind,
            segment.resolution.language.map(|l| l.as_str()).unwrap_or_default(),
            escape_html(&segment.resolution.alias_chain.names().join(" -> ")),
            escape_html(segment.resolution.target.as_deref().unwrap_or_default()),
        );
    }
    let _ = writeln!(out, "</table>");

    let _ = writeln!(out, "<h2>Phases</h2>\n<table>");
    let _ = writeln!(out, "<tr><th>seq</th><th>position</th><th>phase</th><th>request</th><th>response in</th><th>output</th><th>error</th></tr>");
    for phase in &trace.phases {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            phase.sequence,
            phase.position,
            escape_html(&phase.segment),
            phase.phase,
            escape_html(&phase.input.request),
            escape_html(phase.input.response.as_deref().unwrap_or_default()),
            escape_html(
                phase
                    .output
                    .as_ref()
                    .and_then(|o| o.output.as_deref())
                    .unwrap_or_default()
            ),
            escape_html(phase.error.as_deref().unwrap_or_default()),
        );
    }
    let _ = writeln!(out, "</table>");

    if let Some(error) = &trace.error {
        let _ = writeln!(
            out,
            "<h2>Error</h2>\n<p class=\"error\"><code>{}</code> {}</p>",
            error.kind,
            escape_html(&error.message)
        );
    } else if let Some(result) = &trace.result {
        let _ = writeln!(
            out,
            "<h2>Result</h2>\n<p>status {}</p>\n<pre>{}</pre>",
            result.status,
            escape_html(result.output.as_deref().unwrap_or_default())
        );
    }
    out.push_str("</body></html>\n");
    out
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
