//! Cell-level parsing for the massacre dataset.
//!
//! Every parser here is total: a malformed cell resolves to a defined
//! default instead of an error, so a single bad cell never drops its row.

use std::borrow::Cow;

use chrono::NaiveDate;

/// Parses a victim-count cell.
///
/// Takes the leading run of ASCII digits after an optional sign, so
/// `"5 victims"` is `5` and `"3.7"` is `3`. A cell with no leading digits
/// (empty, `"n/a"`, `"?"`) is `0`, as is any negative value. Zero victims
/// and an unparsable cell are indistinguishable after parsing.
#[must_use]
pub fn parse_count(s: &str) -> u32 {
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    })
}

/// Parses a latitude or longitude cell.
///
/// Reads the leading decimal number and ignores anything after it, so
/// `"-22.8847 S"` is `-22.8847`. Returns `None` when the cell has no
/// leading number or the value is not finite. A decimal comma
/// (`"-22,97"`) is accepted when the value has no dot.
#[must_use]
pub fn parse_coordinate(s: &str) -> Option<f64> {
    let s = s.trim();
    let normalized: Cow<'_, str> = if s.contains(',') && !s.contains('.') {
        Cow::Owned(s.replace(',', "."))
    } else {
        Cow::Borrowed(s)
    };
    let value = float_prefix(&normalized).parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Longest prefix of `s` shaped like a decimal float: optional sign,
/// digits with at most one `.`, then an optional exponent. Empty when `s`
/// does not start with a number.
fn float_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let skip_digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let start = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let mut end = skip_digits(start);
    let mut digits = end - start;

    if bytes.get(end) == Some(&b'.') {
        let fraction_end = skip_digits(end + 1);
        digits += fraction_end - (end + 1);
        end = fraction_end;
    }

    if digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
        let exponent_end = skip_digits(exponent);
        if exponent_end > exponent {
            end = exponent_end;
        }
    }

    &s[..end]
}

/// Parses a `Date` cell. See [`massacre_map_incident_models::parse_incident_date`].
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    massacre_map_incident_models::parse_incident_date(s)
}
