//! Subnet selector values and their stable fingerprint.

pub mod hash;
pub mod value;

pub use hash::{
    HashError, MAX_SELECTOR_DEPTH, SelectorFingerprint, fingerprint, format_fingerprint,
};
pub use value::SelectorValue;
