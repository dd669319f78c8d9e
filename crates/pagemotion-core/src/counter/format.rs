//! Counter text formatting
//!
//! Matches what a browser prints for
//! `n.toLocaleString("en-US", { minimumFractionDigits: d, maximumFractionDigits: d })`:
//! comma thousands separators, a dot decimal point and exactly `d` decimals.

use super::spec::CounterSpec;

/// Render `raw / spec.scale` with the spec's decimals, prefix and suffix
pub fn format_value(raw: f64, spec: &CounterSpec) -> String {
    let mut out = String::with_capacity(spec.prefix.len() + spec.suffix.len() + 16);
    out.push_str(&spec.prefix);
    out.push_str(&format_number(raw / spec.scale, spec.decimals));
    out.push_str(&spec.suffix);
    out
}

/// Fixed-decimal number with grouped thousands
pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let (int_part, frac_part) = round_half_away(value.abs(), decimals);

    // "-0.00" is printed without the sign
    let is_zero = int_part.bytes().chain(frac_part.bytes()).all(|b| b == b'0');
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + decimals + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }

    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if decimals > 0 {
        out.push('.');
        out.push_str(&frac_part);
    }
    out
}

/// Round a non-negative finite value to `decimals` places, ties away from zero
///
/// Works on the shortest decimal text of the float, so `0.125` rounds to
/// `0.13` even though its binary value sits just below the tie.
fn round_half_away(value: f64, decimals: usize) -> (String, String) {
    let text = value.to_string();
    let (int_text, frac_text) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut digits: Vec<u8> = int_text.bytes().collect();
    let frac = frac_text.as_bytes();
    digits.extend((0..decimals).map(|i| frac.get(i).copied().unwrap_or(b'0')));

    if frac.get(decimals).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let frac_part = String::from_utf8_lossy(&digits[split..]).into_owned();
    digits.truncate(split);
    (String::from_utf8_lossy(&digits).into_owned(), frac_part)
}
