// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Content-address literals.
//!
//! A content address is the unpadded base64url encoding of the SHA-256 digest
//! of the stored bytes, so it is always [`CONTENT_ADDRESS_LENGTH`] characters
//! long. In a chain it may carry a `.ext` suffix, which is an extension hint
//! for language detection and never part of the address itself.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::config::consts::CONTENT_ADDRESS_LENGTH;

const DIGEST_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContentAddress(String);

impl ContentAddress {
    /// Compute the address of `content`.
    pub fn for_content(content: &[u8]) -> Self {
        Self(URL_SAFE_NO_PAD.encode(Sha256::digest(content)))
    }

    /// Parse a bare token (no extension). The error is a human-readable reason.
    pub fn parse(token: &str) -> Result<Self, String> {
        if token.len() != CONTENT_ADDRESS_LENGTH {
            return Err(format!(
                "expected {} characters, found {}",
                CONTENT_ADDRESS_LENGTH,
                token.len()
            ));
        }
        if !is_address_alphabet(token) {
            return Err("contains characters outside the base64url alphabet".to_string());
        }

        match URL_SAFE_NO_PAD.decode(token) {
            Ok(digest) if digest.len() == DIGEST_LENGTH => Ok(Self(token.to_string())),
            Ok(digest) => Err(format!(
                "decodes to {} bytes instead of a {}-byte digest",
                digest.len(),
                DIGEST_LENGTH
            )),
            Err(e) => Err(format!("is not canonical base64url: {}", e)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when every character belongs to the base64url alphabet.
pub fn is_address_alphabet(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Split `stem.ext` into its parts. Only the last dot counts, and both sides
/// must be non-empty for the suffix to be treated as an extension.
pub fn split_extension(segment: &str) -> (&str, Option<&str>) {
    match segment.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            (stem, Some(extension))
        }
        _ => (segment, None),
    }
}
