// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use regex::Regex;
use std::sync::LazyLock;

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("Invalid regex pattern"));

static LEADING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*(?:\.[0-9]*)?").expect("Invalid regex pattern"));

/// Parses a `GL_SHADING_LANGUAGE_VERSION` string.
///
/// Every character other than ASCII digits and `.` is dropped, then the
/// leading decimal number of what remains is parsed. Vendor suffixes are
/// therefore concatenated rather than ignored: `"4.60 NVIDIA 550.54"`
/// reads as `4.6055`.
///
/// Returns `0.0` when nothing parses.
///
/// # Example
/// ```
/// use shaderbg_program::parse_language_version;
///
/// assert_eq!(parse_language_version("OpenGL GLSL 4.50 core"), 4.5);
/// assert_eq!(parse_language_version(""), 0.0);
/// ```
pub fn parse_language_version(version: &str) -> f64 {
    let digits = NON_NUMERIC.replace_all(version, "");
    LEADING_DECIMAL
        .find(&digits)
        .and_then(|number| number.as_str().parse().ok())
        .unwrap_or(0.0)
}
