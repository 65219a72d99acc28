// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Invoker backends for The Chainwork chain execution engine.
//!
//! The engines never run unit code themselves: every invocation crosses the
//! [`Invoker`](crate::traits::Invoker) boundary, and a backend decides what
//! "running a unit" means.
//!
//! # Available Backends
//!
//! ## Local Backend
//! In-process Rust units for text manipulation:
//! - **Transformers** (two-phase): echo, case conversion, reversal, prefix/suffix
//! - **Analysis** (single invocation): word count
//! - **Use Case**: the CLI, demos and end-to-end tests
//!
//! ## Stub Backend (Test-Only)
//! A recording invoker that captures every call and can script failures,
//! fixed results and delays per source. NOT available in production builds.
//!
//! # Examples
//!
//! ```rust
//! use the_chainwork::backends::local::LocalUnitFactory;
//!
//! let unit = LocalUnitFactory::create_unit("reverse_text")?;
//! assert_eq!(unit.name(), "reverse_text");
//! # Ok::<(), String>(())
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
