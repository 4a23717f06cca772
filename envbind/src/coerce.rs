//! Conversion of a single resolved string into a typed value.
//!
//! | Type                         | Accepted input                                   |
//! |------------------------------|--------------------------------------------------|
//! | `bool`                       | `""` (false), `1 t T TRUE true True`, `0 f ...`  |
//! | `i8`..`i128`, `isize`        | base 10, optional sign                           |
//! | `u8`..`u128`, `usize`        | base 10, or `0x` / `0o` / `0b` / leading `0`     |
//! | `f32`, `f64`                 | decimal or scientific notation                   |
//! | `Duration`                   | `1h30m`, `1.5s`, `300ms`, `0`                    |
//! | `String`                     | anything                                         |
//! | `Vec<T>`                     | `a, b, c`                                        |
//! | `HashMap<K, V>`, `BTreeMap`  | `k1=v1; k2=v2`                                   |

use crate::error::CoerceError;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::time::Duration;

/// Element separator for sequences.
pub const SEQUENCE_SEPARATOR: char = ',';
/// Entry separator for mappings.
pub const ENTRY_SEPARATOR: char = ';';
/// Key/value separator inside a mapping entry.
pub const PAIR_SEPARATOR: char = '=';

/// Types that can be produced from a single environment variable value.
pub trait Coerce: Sized {
    /// Convert `raw` into `Self`.
    fn coerce(raw: &str) -> Result<Self, CoerceError>;
}

impl Coerce for String {
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

impl Coerce for bool {
    /// A blank value means off.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "" => Ok(false),
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(CoerceError::Bool {
                input: raw.to_string(),
            }),
        }
    }
}

macro_rules! impl_coerce_signed {
    ($($t:ty),*) => {$(
        impl Coerce for $t {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                raw.parse::<$t>().map_err(|e| CoerceError::Int {
                    kind: stringify!($t),
                    input: raw.to_string(),
                    message: e.to_string(),
                })
            }
        }
    )*};
}

macro_rules! impl_coerce_unsigned {
    ($($t:ty),*) => {$(
        impl Coerce for $t {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                let fail = |message: String| CoerceError::Int {
                    kind: stringify!($t),
                    input: raw.to_string(),
                    message,
                };
                let (radix, digits) = split_radix(raw).map_err(fail)?;
                <$t>::from_str_radix(&digits, radix).map_err(|e| fail(e.to_string()))
            }
        }
    )*};
}

macro_rules! impl_coerce_float {
    ($($t:ty),*) => {$(
        impl Coerce for $t {
            fn coerce(raw: &str) -> Result<Self, CoerceError> {
                raw.parse::<$t>().map_err(|e| CoerceError::Float {
                    kind: stringify!($t),
                    input: raw.to_string(),
                    message: e.to_string(),
                })
            }
        }
    )*};
}

impl_coerce_signed!(i8, i16, i32, i64, i128, isize);
impl_coerce_unsigned!(u8, u16, u32, u64, u128, usize);
impl_coerce_float!(f32, f64);

/// Work out the base of an unsigned literal from its prefix.
///
/// A `_` separator is accepted between two digits, or right after a base prefix.
fn split_radix(raw: &str) -> Result<(u32, String), String> {
    if raw.starts_with(['+', '-']) {
        return Err("sign not allowed for unsigned integer".to_string());
    }

    let lower = raw.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lower.as_deref() {
        Some("0x") => (16, &raw[2..]),
        Some("0o") => (8, &raw[2..]),
        Some("0b") => (2, &raw[2..]),
        _ if raw.len() > 1 && raw.starts_with('0') => (8, &raw[1..]),
        _ => {
            if raw.starts_with('_') {
                return Err("misplaced digit separator".to_string());
            }
            (10, raw)
        }
    };

    if digits.starts_with(['+', '-']) {
        return Err("sign not allowed for unsigned integer".to_string());
    }
    if digits.ends_with('_') || digits.contains("__") {
        return Err("misplaced digit separator".to_string());
    }

    Ok((radix, digits.replace('_', "")))
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(60 * NANOS_PER_SEC),
        "h" => Some(3_600 * NANOS_PER_SEC),
        _ => None,
    }
}

impl Coerce for Duration {
    /// Parse a sequence of decimal numbers with unit suffixes, such as `1h30m` or `1.5s`.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        let fail = |message: &str| CoerceError::Duration {
            input: raw.to_string(),
            message: message.to_string(),
        };

        let (negative, mut rest) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw.strip_prefix('+').unwrap_or(raw)),
        };
        if rest == "0" {
            return Ok(Duration::ZERO);
        }
        if rest.is_empty() {
            return Err(fail("empty duration"));
        }

        let mut total: u128 = 0;
        while !rest.is_empty() {
            let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let (int_part, after) = rest.split_at(int_len);

            let (frac_part, after) = match after.strip_prefix('.') {
                Some(after) => {
                    let len = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
                    after.split_at(len)
                }
                None => ("", after),
            };
            if int_part.is_empty() && frac_part.is_empty() {
                return Err(fail("expected a number"));
            }

            let unit_len = after
                .find(|c: char| c == '.' || c.is_ascii_digit())
                .unwrap_or(after.len());
            let (unit, after) = after.split_at(unit_len);
            if unit.is_empty() {
                return Err(fail("missing unit"));
            }
            let scale = unit_nanos(unit).ok_or_else(|| fail("unknown unit"))?;

            let mut value: u128 = 0;
            for digit in int_part.bytes() {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u128::from(digit - b'0')))
                    .ok_or_else(|| fail("overflow"))?;
            }
            value = value.checked_mul(scale).ok_or_else(|| fail("overflow"))?;

            // Digits beyond nanosecond precision of the largest unit do not change the result.
            let mut frac_value: u128 = 0;
            let mut frac_scale: u128 = 1;
            for digit in frac_part.bytes().take(18) {
                frac_value = frac_value * 10 + u128::from(digit - b'0');
                frac_scale *= 10;
            }
            value = value
                .checked_add(frac_value * scale / frac_scale)
                .ok_or_else(|| fail("overflow"))?;

            total = total.checked_add(value).ok_or_else(|| fail("overflow"))?;
            rest = after;
        }

        if negative && total != 0 {
            return Err(fail("negative durations are not supported"));
        }

        let secs = u64::try_from(total / NANOS_PER_SEC).map_err(|_| fail("overflow"))?;
        Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
    }
}

impl<T: Coerce> Coerce for Vec<T> {
    /// An empty string is one empty element, not an empty sequence.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        raw.split(SEQUENCE_SEPARATOR)
            .map(|element| T::coerce(element.trim()))
            .collect()
    }
}

fn coerce_entry<K: Coerce, V: Coerce>(entry: &str) -> Result<(K, V), CoerceError> {
    let (key, value) = entry
        .split_once(PAIR_SEPARATOR)
        .ok_or_else(|| CoerceError::MalformedEntry {
            entry: entry.to_string(),
        })?;
    Ok((K::coerce(key.trim())?, V::coerce(value.trim())?))
}

impl<K, V> Coerce for HashMap<K, V>
where
    K: Coerce + Eq + Hash,
    V: Coerce,
{
    /// Duplicate keys keep the last value.
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        raw.split(ENTRY_SEPARATOR).map(coerce_entry).collect()
    }
}

impl<K, V> Coerce for BTreeMap<K, V>
where
    K: Coerce + Ord,
    V: Coerce,
{
    fn coerce(raw: &str) -> Result<Self, CoerceError> {
        raw.split(ENTRY_SEPARATOR).map(coerce_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_lexicon() {
        for input in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(bool::coerce(input).unwrap(), "{input}");
        }
        for input in ["", "0", "f", "F", "FALSE", "false", "False"] {
            assert!(!bool::coerce(input).unwrap(), "{input}");
        }
        assert!(matches!(bool::coerce("yes"), Err(CoerceError::Bool { .. })));
        assert!(bool::coerce("tRuE").is_err());
    }

    #[test]
    fn test_signed_integers() {
        assert_eq!(i32::coerce("-42").unwrap(), -42);
        assert_eq!(i64::coerce("+7").unwrap(), 7);
        assert!(i32::coerce("").is_err());
        assert!(i32::coerce("0x10").is_err());
    }

    #[test]
    fn test_integer_overflow_names_width() {
        match i8::coerce("128") {
            Err(CoerceError::Int { kind, .. }) => assert_eq!(kind, "i8"),
            other => panic!("expected Int error, got {other:?}"),
        }
        match u16::coerce("70000") {
            Err(CoerceError::Int { kind, .. }) => assert_eq!(kind, "u16"),
            other => panic!("expected Int error, got {other:?}"),
        }
    }

    #[test]
    fn test_unsigned_base_prefixes() {
        assert_eq!(u32::coerce("42").unwrap(), 42);
        assert_eq!(u32::coerce("0x1F").unwrap(), 31);
        assert_eq!(u32::coerce("0o17").unwrap(), 15);
        assert_eq!(u32::coerce("017").unwrap(), 15);
        assert_eq!(u32::coerce("0b101").unwrap(), 5);
        assert_eq!(u32::coerce("0").unwrap(), 0);
        assert_eq!(u64::coerce("0x_ff_ff").unwrap(), 0xffff);
        assert!(u32::coerce("-1").is_err());
        assert!(u32::coerce("0x").is_err());
        assert!(u32::coerce("09").is_err());
    }

    #[test]
    fn test_unsigned_digit_separators() {
        assert_eq!(u32::coerce("1_000").unwrap(), 1000);
        assert_eq!(u64::coerce("1_000_000").unwrap(), 1_000_000);
        assert_eq!(u32::coerce("0_17").unwrap(), 15);
        assert_eq!(u32::coerce("0b_1_0").unwrap(), 2);
        for input in ["_1", "1_", "1__0", "0x__1", "_"] {
            assert!(
                matches!(u32::coerce(input), Err(CoerceError::Int { kind: "u32", .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_floats() {
        assert_eq!(f64::coerce("1.5").unwrap(), 1.5);
        assert_eq!(f32::coerce("2e3").unwrap(), 2000.0);
        assert!(matches!(
            f64::coerce("one"),
            Err(CoerceError::Float { kind: "f64", .. })
        ));
    }

    #[test]
    fn test_duration_grammar() {
        assert_eq!(Duration::coerce("0").unwrap(), Duration::ZERO);
        assert_eq!(Duration::coerce("300ms").unwrap(), Duration::from_millis(300));
        assert_eq!(Duration::coerce("1h30m").unwrap(), Duration::from_secs(5400));
        assert_eq!(Duration::coerce("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(Duration::coerce(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(Duration::coerce("2h45m10s").unwrap(), Duration::from_secs(9910));
        assert_eq!(Duration::coerce("10us").unwrap(), Duration::from_micros(10));
        assert_eq!(Duration::coerce("10\u{b5}s").unwrap(), Duration::from_micros(10));
        assert_eq!(Duration::coerce("+5ns").unwrap(), Duration::from_nanos(5));
    }

    #[test]
    fn test_duration_signed_zero() {
        assert_eq!(Duration::coerce("-0").unwrap(), Duration::ZERO);
        assert_eq!(Duration::coerce("+0").unwrap(), Duration::ZERO);
        assert_eq!(Duration::coerce("-0s").unwrap(), Duration::ZERO);
        assert_eq!(Duration::coerce("-0.0h").unwrap(), Duration::ZERO);
        assert!(Duration::coerce("-").is_err());
        assert!(Duration::coerce("-1ns").is_err());
    }

    #[test]
    fn test_duration_rejects_malformed() {
        for input in ["", "10", "1x", "-1s", "h", ".s", "1.2.3s"] {
            assert!(
                matches!(Duration::coerce(input), Err(CoerceError::Duration { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_sequence_trims_elements() {
        assert_eq!(Vec::<i32>::coerce("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(
            Vec::<String>::coerce(" a ,b").unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_sequence_of_empty_string() {
        assert_eq!(Vec::<String>::coerce("").unwrap(), vec![String::new()]);
        assert!(Vec::<i32>::coerce("").is_err());
    }

    #[test]
    fn test_sequence_element_failure_aborts() {
        assert!(matches!(
            Vec::<u8>::coerce("1,x,3"),
            Err(CoerceError::Int { kind: "u8", .. })
        ));
    }

    #[test]
    fn test_mapping_entries() {
        let map = HashMap::<String, i32>::coerce("a=1;b=2").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 1);
        assert_eq!(map["b"], 2);

        let map = BTreeMap::<String, i32>::coerce(" a = 1 ; a=2").unwrap();
        assert_eq!(map.into_iter().collect::<Vec<_>>(), vec![("a".to_string(), 2)]);
    }

    #[test]
    fn test_mapping_value_keeps_later_separators() {
        let map = HashMap::<String, String>::coerce("url=a=b").unwrap();
        assert_eq!(map["url"], "a=b");
    }

    #[test]
    fn test_mapping_malformed_entry() {
        assert_eq!(
            HashMap::<String, String>::coerce("a=1;b"),
            Err(CoerceError::MalformedEntry {
                entry: "b".to_string()
            })
        );
        assert!(HashMap::<String, String>::coerce("").is_err());
    }

    #[test]
    fn test_mapping_of_sequences() {
        let map = HashMap::<String, Vec<u16>>::coerce("web=80,443;db=5432").unwrap();
        assert_eq!(map["web"], vec![80, 443]);
        assert_eq!(map["db"], vec![5432]);
    }
}
