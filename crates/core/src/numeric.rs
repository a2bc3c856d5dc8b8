//! Leading-numeric string coercion.
//!
//! Form fields and remote payloads carry numbers as free text. Both sides
//! read them the permissive way a spreadsheet script would: skip leading
//! whitespace, take the longest numeric prefix, ignore whatever follows.

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn count_hex_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_hexdigit()).count()
}

/// Parse the longest floating-point prefix of `input`.
///
/// Returns `None` when no digits lead the string (after whitespace and an
/// optional sign). `"5."`, `".5"`, `"19.99 USD"` and `"1e3x"` all parse.
/// A leading `Infinity` yields an infinite value.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Parse the longest integer prefix of `input` (base 10, or base 16 with a
/// `0x` prefix).
///
/// Fractions are truncated (`"5.7"` is 5). Values outside `i64` are treated
/// as unparsable.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        let len = count_hex_digits(hex.as_bytes());
        if len == 0 {
            return None;
        }
        i64::from_str_radix(&hex[..len], 16).ok()?
    } else {
        let len = count_digits(unsigned.as_bytes());
        if len == 0 {
            return None;
        }
        unsigned[..len].parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}
