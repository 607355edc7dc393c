//! Stable selector fingerprint.
//!
//! `fingerprint = xxhash64(canonical(selector))`
//!
//! Canonical encoding rules:
//! - every value is prefixed with a type tag, so `"1"` and `1` never collide;
//! - map entries are written in sorted key order, so iteration order is irrelevant;
//! - list elements keep their order;
//! - signed and unsigned integers of equal value encode identically;
//! - `-0.0` is written as `0.0`; NaN and infinities cannot be canonicalized
//!   and are rejected rather than skipped.

use std::fmt;

use thiserror::Error;
use xxhash_rust::xxh64::Xxh64;

use super::SelectorValue;

/// Maximum nesting depth accepted by [`fingerprint`].
pub const MAX_SELECTOR_DEPTH: usize = 64;

const TAG_NULL: u8 = 0x00;
const TAG_BOOL: u8 = 0x01;
const TAG_INT: u8 = 0x02;
const TAG_FLOAT: u8 = 0x03;
const TAG_STRING: u8 = 0x04;
const TAG_LIST: u8 = 0x05;
const TAG_MAP: u8 = 0x06;

/// Separator byte that cannot appear in UTF-8 strings.
const SEP: u8 = 0xFF;

/// Fixed-width fingerprint of a selector, used only as a cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectorFingerprint(pub u64);

impl fmt::Display for SelectorFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A selector that cannot be turned into a stable cache key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    #[error("selector value at {path} is a non-finite float and cannot be canonicalized")]
    NonFiniteFloat { path: String },
    #[error("selector nesting exceeds {limit} levels")]
    DepthExceeded { limit: usize },
}

#[derive(Debug, Clone, Copy)]
enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

fn render_path(path: &[PathSegment<'_>]) -> String {
    let mut out = String::from("$");
    for seg in path {
        match seg {
            PathSegment::Key(k) => {
                out.push('.');
                out.push_str(k);
            }
            PathSegment::Index(i) => out.push_str(&format!("[{i}]")),
        }
    }
    out
}

/// Compute the fingerprint of a selector.
pub fn fingerprint(selector: &SelectorValue) -> Result<SelectorFingerprint, HashError> {
    let mut hasher = Xxh64::new(0);
    let mut path = Vec::new();
    write_value(&mut hasher, selector, &mut path)?;
    Ok(SelectorFingerprint(hasher.digest()))
}

/// Format a fingerprint as a fixed-width hex string.
pub fn format_fingerprint(fp: SelectorFingerprint) -> String {
    fp.to_string()
}

fn write_value<'a>(
    hasher: &mut Xxh64,
    value: &'a SelectorValue,
    path: &mut Vec<PathSegment<'a>>,
) -> Result<(), HashError> {
    if path.len() > MAX_SELECTOR_DEPTH {
        return Err(HashError::DepthExceeded {
            limit: MAX_SELECTOR_DEPTH,
        });
    }

    match value {
        SelectorValue::Null => hasher.update(&[TAG_NULL]),
        SelectorValue::Bool(b) => hasher.update(&[TAG_BOOL, u8::from(*b)]),
        SelectorValue::Int(i) => write_int(hasher, i128::from(*i)),
        SelectorValue::UInt(u) => write_int(hasher, i128::from(*u)),
        SelectorValue::Float(f) => {
            if !f.is_finite() {
                return Err(HashError::NonFiniteFloat {
                    path: render_path(path),
                });
            }
            // 0.0 == -0.0 but their bit patterns differ.
            let canonical = if *f == 0.0 { 0.0_f64 } else { *f };
            hasher.update(&[TAG_FLOAT]);
            hasher.update(&canonical.to_bits().to_le_bytes());
        }
        SelectorValue::String(s) => {
            hasher.update(&[TAG_STRING]);
            hasher.update(s.as_bytes());
            hasher.update(&[SEP]);
        }
        SelectorValue::List(items) => {
            hasher.update(&[TAG_LIST]);
            hasher.update(&(items.len() as u64).to_le_bytes());
            for (idx, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(idx));
                write_value(hasher, item, path)?;
                path.pop();
            }
        }
        SelectorValue::Map(entries) => {
            hasher.update(&[TAG_MAP]);
            hasher.update(&(entries.len() as u64).to_le_bytes());
            let mut keys: Vec<&String> = entries.keys().collect();
            keys.sort_unstable();
            for key in keys {
                hasher.update(key.as_bytes());
                hasher.update(&[SEP]);
                path.push(PathSegment::Key(key));
                write_value(hasher, &entries[key], path)?;
                path.pop();
            }
        }
    }
    Ok(())
}

fn write_int(hasher: &mut Xxh64, value: i128) {
    hasher.update(&[TAG_INT]);
    hasher.update(&value.to_le_bytes());
}
