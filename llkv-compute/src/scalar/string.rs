//! Byte-oriented string functions.
//!
//! Strings are `VARBINARY` at the catalog level, so every function here works
//! on raw bytes. Case mapping and trimming are ASCII-only; positions are
//! 1-based byte offsets.

use llkv_result::{Error, Result};

use crate::module::{ScalarFunctionDef, ScalarModule};

pub fn string_functions() -> ScalarModule {
    ScalarModule::new("string")
        .function(ScalarFunctionDef::stateless("length", length))
        .function(ScalarFunctionDef::stateless("reverse", reverse))
        .function(ScalarFunctionDef::stateless("lower", lower))
        .function(ScalarFunctionDef::stateless("upper", upper))
        .function(ScalarFunctionDef::stateless("ltrim", ltrim))
        .function(ScalarFunctionDef::stateless("rtrim", rtrim))
        .function(ScalarFunctionDef::stateless("trim", trim))
        .function(ScalarFunctionDef::stateless("concat", concat))
        .function(ScalarFunctionDef::stateless("substr", substr).alias("substring"))
        .function(
            ScalarFunctionDef::stateless("substr_with_length", substr_with_length)
                .named("substr")
                .alias("substring"),
        )
        .function(ScalarFunctionDef::stateless("strpos", strpos))
        .function(ScalarFunctionDef::stateless("replace", replace))
}

pub fn length(s: Vec<u8>) -> Result<i64> {
    i64::try_from(s.len())
        .map_err(|_| Error::InvalidArgumentError("length exceeds i64 range".into()))
}

pub fn reverse(mut s: Vec<u8>) -> Vec<u8> {
    s.reverse();
    s
}

pub fn lower(mut s: Vec<u8>) -> Vec<u8> {
    s.make_ascii_lowercase();
    s
}

pub fn upper(mut s: Vec<u8>) -> Vec<u8> {
    s.make_ascii_uppercase();
    s
}

pub fn ltrim(s: Vec<u8>) -> Vec<u8> {
    let start = s.iter().position(|b| *b != b' ').unwrap_or(s.len());
    s[start..].to_vec()
}

pub fn rtrim(s: Vec<u8>) -> Vec<u8> {
    let end = s.iter().rposition(|b| *b != b' ').map_or(0, |idx| idx + 1);
    s[..end].to_vec()
}

pub fn trim(s: Vec<u8>) -> Vec<u8> {
    rtrim(ltrim(s))
}

pub fn concat(mut left: Vec<u8>, right: Vec<u8>) -> Vec<u8> {
    left.extend_from_slice(&right);
    left
}

/// Suffix starting at `start`. Negative `start` counts back from the end;
/// `0` or an out-of-range start yields an empty result.
pub fn substr(s: Vec<u8>, start: i64) -> Vec<u8> {
    match start_offset(s.len(), start) {
        Some(offset) => s[offset..].to_vec(),
        None => Vec::new(),
    }
}

pub fn substr_with_length(s: Vec<u8>, start: i64, length: i64) -> Vec<u8> {
    if length <= 0 {
        return Vec::new();
    }
    let Some(offset) = start_offset(s.len(), start) else {
        return Vec::new();
    };
    let remaining = s.len() - offset;
    let take = usize::try_from(length).map_or(remaining, |len| len.min(remaining));
    s[offset..offset + take].to_vec()
}

fn start_offset(len: usize, start: i64) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let one_based = if start < 0 { len + start + 1 } else { start };
    if one_based < 1 || one_based > len {
        return None;
    }
    usize::try_from(one_based - 1).ok()
}

/// 1-based position of the first occurrence of `needle`, or `0`.
pub fn strpos(haystack: Vec<u8>, needle: Vec<u8>) -> Result<i64> {
    let position = find(&haystack, &needle).map_or(0, |idx| idx + 1);
    i64::try_from(position)
        .map_err(|_| Error::InvalidArgumentError("strpos result exceeds i64 range".into()))
}

/// Replace every occurrence of `search`. An empty `search` leaves the input
/// unchanged.
pub fn replace(s: Vec<u8>, search: Vec<u8>, replacement: Vec<u8>) -> Vec<u8> {
    if search.is_empty() {
        return s;
    }
    let mut out = Vec::with_capacity(s.len());
    let mut rest = s.as_slice();
    while let Some(idx) = find(rest, &search) {
        out.extend_from_slice(&rest[..idx]);
        out.extend_from_slice(&replacement);
        rest = &rest[idx + search.len()..];
    }
    out.extend_from_slice(rest);
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
