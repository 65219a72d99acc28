// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic and operational logging goes through the message types in
//! [`messages`]. Each type implements `Display` and
//! [`messages::StructuredLog`], which keeps magic strings out of the engine
//! and gives every event consistent structured fields.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::classification` - segment classification and alias resolution
//! * `messages::engine` - evaluation lifecycle and debug traces
//! * `messages::invocation` - unit invocations
//! * `messages::validation` - configuration validation warnings and errors
//!
//! # Usage
//!
//! ```rust
//! use the_chainwork::chain::Phase;
//! use the_chainwork::observability::messages::invocation::InvocationFailed;
//!
//! let error = std::io::Error::new(std::io::ErrorKind::Other, "test error");
//! let msg = InvocationFailed {
//!     segment: "upper",
//!     index: 0,
//!     phase: Phase::Invoke,
//!     error: &error,
//! };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
