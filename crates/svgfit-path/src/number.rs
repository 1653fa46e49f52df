//! ECMAScript-compatible number helpers.
//!
//! Geometry is rounded and printed the way JS engines do it (`Math.round`, `Number#toFixed`,
//! `Number#toString`), so rewritten documents stay byte-stable across platforms: `75` rather
//! than `75.0`, `0.5`, `1e+21`.

/// `Math.round`: ties round toward positive infinity.
pub fn js_round(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Rounds to `digits` decimal places, i.e. `Math.round(v * 10^digits) / 10^digits`.
pub fn round_to(v: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    js_round(v * factor) / factor
}

/// Enough fraction digits to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// `+v.toFixed(digits)`: rounds the exact decimal value of `v`, ties away from zero.
///
/// Differs from [`round_to`] for values such as `1.115` (stored as `1.11499…`), which this
/// rounds to `1.11`.
pub fn to_fixed(v: f64, digits: u32) -> f64 {
    // toFixed falls back to exponent notation from 1e21 up; the value is unchanged there.
    if !v.is_finite() || v.abs() >= 1e21 {
        return v;
    }
    let digits = digits as usize;
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, v.abs());
    let Some(point) = exact.find('.') else {
        return v;
    };
    let cut = point + 1 + digits;
    let Some(&next) = exact.as_bytes().get(cut) else {
        return v;
    };
    let round_up = next >= b'5';

    let mut kept = exact.as_bytes()[..cut].to_vec();
    if round_up {
        increment_decimal(&mut kept);
    }
    let text = String::from_utf8_lossy(&kept);
    let magnitude = text.trim_end_matches('.').parse::<f64>().unwrap_or(v.abs());
    if v.is_sign_negative() { -magnitude } else { magnitude }
}

/// Adds one unit in the last place of an ASCII decimal, carrying through `9`s and the point.
fn increment_decimal(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        match *d {
            b'.' => continue,
            b'9' => *d = b'0',
            _ => {
                *d += 1;
                return;
            }
        }
    }
    digits.insert(0, b'1');
}

/// Parses an attribute value with `Number(...)` semantics for the inputs that matter here:
/// surrounding whitespace is ignored and only finite values are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_number(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    js_number_to_string(v, &mut buf).to_string()
}

pub fn push_number(out: &mut String, v: f64, buf: &mut ryu_js::Buffer) {
    out.push_str(js_number_to_string(v, buf));
}

pub(crate) fn js_number_to_string(mut v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if v.is_nan() {
        return "NaN";
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" };
    }
    if v == -0.0 {
        v = 0.0;
    }
    buf.format_finite(v)
}
