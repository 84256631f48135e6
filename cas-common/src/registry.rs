// cas-common/src/registry.rs
//! CAS Registry Number shape and check digit validation.
//!
//! A registry number is three hyphen separated groups: 1-7 digits, exactly
//! 2 digits, and a single check digit, e.g. `110-63-4`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CasError;

pub static CAS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,7}-[0-9]{2}-[0-9]$").expect("registry number pattern is valid")
});

/// How the check digit is compared against the weighted digit sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumScheme {
    /// Digits of the first two groups weighted 1, 2, 3... from the rightmost
    /// digit; valid when the sum mod 10 equals the check digit.
    #[default]
    Standard,
    /// Weights run left to right through the first group starting at 1 and
    /// restart at `len(first)` for the middle group, so the boundary weight
    /// is used twice. Valid when the sum mod 10 differs from the check digit.
    Reference,
}

/// Returns whether `cas_rn` is a well-formed registry number with a correct
/// check digit. Malformed input is `false`, never an error.
pub fn is_valid(cas_rn: &str) -> bool {
    is_valid_with(cas_rn, ChecksumScheme::Standard)
}

pub fn is_valid_with(cas_rn: &str, scheme: ChecksumScheme) -> bool {
    let Some((first, middle, last)) = split(cas_rn) else {
        return false;
    };
    let check = digit(last.as_bytes()[0]);
    match scheme {
        ChecksumScheme::Standard => checksum(first, middle) % 10 == check,
        ChecksumScheme::Reference => reference_checksum(first, middle) % 10 != check,
    }
}

/// Weighted sum of the first two groups, weight 1 on the rightmost digit.
pub fn checksum(first: &str, middle: &str) -> u32 {
    first
        .bytes()
        .chain(middle.bytes())
        .rev()
        .zip(1u32..)
        .map(|(b, weight)| weight * digit(b))
        .sum()
}

/// Weighted sum as computed by [`ChecksumScheme::Reference`].
pub fn reference_checksum(first: &str, middle: &str) -> u32 {
    let start_middle = first.len() as u32;
    let sum_first: u32 = first.bytes().zip(1u32..).map(|(b, i)| i * digit(b)).sum();
    let sum_middle: u32 = middle
        .bytes()
        .zip(start_middle..)
        .map(|(b, i)| i * digit(b))
        .sum();
    sum_first + sum_middle
}

fn split(cas_rn: &str) -> Option<(&str, &str, &str)> {
    if !CAS_RE.is_match(cas_rn) {
        return None;
    }
    let mut parts = cas_rn.splitn(3, '-');
    Some((parts.next()?, parts.next()?, parts.next()?))
}

fn digit(b: u8) -> u32 {
    u32::from(b - b'0')
}

/// A string known to have registry number shape. The check digit is not
/// verified here; records served by the API are trusted on that point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RegistryNumber(String);

impl RegistryNumber {
    pub fn parse(s: &str) -> Option<Self> {
        CAS_RE.is_match(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the check digit is also correct.
    pub fn has_valid_checksum(&self) -> bool {
        is_valid(&self.0)
    }
}

impl FromStr for RegistryNumber {
    type Err = CasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            CasError::Validation(format!("'{s}' does not look like a CAS registry number"))
        })
    }
}

impl fmt::Display for RegistryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RegistryNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for RegistryNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for RegistryNumber {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl<'de> Deserialize<'de> for RegistryNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        RegistryNumber::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "string '{s}' does not match pattern {}",
                CAS_RE.as_str()
            ))
        })
    }
}
