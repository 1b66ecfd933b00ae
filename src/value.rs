//! Value Encoding
//!
//! Every preference is stored as text. This module defines the canonical
//! encoding for each supported logical type and the matching decoder.
//!
//! ## Encodings
//! ```text
//! ┌──────────┬──────────────────────────────┬────────────────────────────┐
//! │ Type     │ Encoded                      │ Decode failure             │
//! ├──────────┼──────────────────────────────┼────────────────────────────┤
//! │ bool     │ "true" / "false"             │ never: non-"true" is false │
//! │ i64      │ base-10, optional '-'        │ caller's default           │
//! │ f64      │ shortest round-trip, 1.5E0   │ caller's default           │
//! │ String   │ verbatim                     │ never                      │
//! └──────────┴──────────────────────────────┴────────────────────────────┘
//! ```
//!
//! Decoding is deliberately permissive. A getter must always produce a value,
//! so a stored string that does not parse yields `None` here and the store
//! substitutes the default without reporting anything.

/// Canonical token for `true`
pub const TRUE_TOKEN: &str = "true";

/// Canonical token for `false`
pub const FALSE_TOKEN: &str = "false";

/// A scalar that can be stored in a [`Store`](crate::Store)
pub trait Preference: Sized {
    /// Canonical text form written to the store file
    fn encode(&self) -> String;

    /// Parse a stored string. `None` means "use the default".
    fn decode(raw: &str) -> Option<Self>;
}

impl Preference for bool {
    fn encode(&self) -> String {
        let token = if *self { TRUE_TOKEN } else { FALSE_TOKEN };
        token.to_string()
    }

    /// Anything other than the exact `true` token decodes as `false`,
    /// including garbage. The default is only used for missing keys.
    fn decode(raw: &str) -> Option<Self> {
        Some(raw == TRUE_TOKEN)
    }
}

impl Preference for i64 {
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }
}

impl Preference for f64 {
    /// Uses the upper-case exponent form. Rust prints the shortest digits
    /// that parse back to the same bits, so every finite value round-trips
    /// exactly (`-0.0` and subnormals included).
    fn encode(&self) -> String {
        format!("{:E}", self)
    }

    /// Accepts any standard float text, so files written with a signed,
    /// zero-padded exponent (`1.5E+00`) still load.
    ///
    /// Out-of-range text such as `1e400` is a decode failure, not infinity.
    /// Only the explicit `inf`/`infinity`/`nan` tokens decode as non-finite.
    fn decode(raw: &str) -> Option<Self> {
        let value: f64 = raw.parse().ok()?;
        if value.is_finite() || is_special_float(raw) {
            Some(value)
        } else {
            None
        }
    }
}

fn is_special_float(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    ["inf", "infinity", "nan"]
        .iter()
        .any(|token| unsigned.eq_ignore_ascii_case(token))
}

impl Preference for String {
    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}
