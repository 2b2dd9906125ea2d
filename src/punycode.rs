//! The Punycode codec defined in [RFC 3492].
//!
//! Punycode transcodes a single DNS label between its Unicode form and the
//! ASCII-compatible (`xn--`) form used on the wire. The bootstring
//! parameters below are exact per RFC 3492 and must not be altered.
//!
//! [RFC 3492]: https://datatracker.ietf.org/doc/html/rfc3492/

use crate::PunycodeError;

const BASE: u32 = 36;
const TMIN: u32 = 1;
const TMAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 128;

/// The ASCII-compatible-encoding prefix.
pub const ACE_PREFIX: &str = "xn--";

/// Bias adaptation per Section 6.1 of RFC 3492.
fn adapt(delta: u32, num_points: u32, first_time: bool) -> u32 {
    let mut delta = if first_time { delta / DAMP } else { delta / 2 };
    delta += delta / num_points;

    let mut k = 0;
    while delta > ((BASE - TMIN) * TMAX) / 2 {
        delta /= BASE - TMIN;
        k += BASE;
    }
    k + ((BASE - TMIN + 1) * delta) / (delta + SKEW)
}

fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias {
        TMIN
    } else if k >= bias + TMAX {
        TMAX
    } else {
        k - bias
    }
}

fn digit_char(d: u32) -> char {
    debug_assert!(d < BASE);
    if d < 26 {
        (b'a' + d as u8) as char
    } else {
        (b'0' + (d - 26) as u8) as char
    }
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(c as u32 - 'a' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        '0'..='9' => Some(c as u32 - '0' as u32 + 26),
        _ => None,
    }
}

/// Encodes a single label into its ASCII-compatible form.
///
/// A pure-ASCII label is returned unchanged; anything else comes back with
/// the `xn--` prefix. Encoding is therefore idempotent on its own output.
///
/// # Errors
///
/// Returns [`PunycodeError::Overflow`] on pathological input whose deltas do
/// not fit in 32 bits.
///
/// # Examples
///
/// ```
/// use uri_parts::punycode::encode_label;
///
/// assert_eq!(encode_label("example").unwrap(), "example");
/// assert_eq!(encode_label("bücher").unwrap(), "xn--bcher-kva");
/// ```
pub fn encode_label(label: &str) -> Result<String, PunycodeError> {
    if label.is_ascii() {
        return Ok(label.to_owned());
    }
    let mut out = String::from(ACE_PREFIX);
    out.push_str(&encode(label)?);
    Ok(out)
}

/// Decodes a single label from its ASCII-compatible form.
///
/// A label without the `xn--` prefix is returned unchanged.
///
/// # Errors
///
/// Returns an error when the part after the prefix is not well-formed
/// bootstring output.
///
/// # Examples
///
/// ```
/// use uri_parts::punycode::decode_label;
///
/// assert_eq!(decode_label("example").unwrap(), "example");
/// assert_eq!(decode_label("xn--bcher-kva").unwrap(), "bücher");
/// ```
pub fn decode_label(label: &str) -> Result<String, PunycodeError> {
    match label.strip_prefix(ACE_PREFIX) {
        Some(rest) => decode(rest),
        None => Ok(label.to_owned()),
    }
}

fn encode(input: &str) -> Result<String, PunycodeError> {
    let points: Vec<u32> = input.chars().map(|c| c as u32).collect();
    let mut out = String::new();

    for &c in &points {
        if c < 128 {
            out.push(c as u8 as char);
        }
    }
    let basic = out.len() as u32;
    if basic > 0 {
        out.push('-');
    }

    let mut n = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut handled = basic;

    while handled < points.len() as u32 {
        // The smallest code point not yet handled. Every iteration has at
        // least one point `>= n` left, but break rather than panic if not.
        let m = match points.iter().copied().filter(|&c| c >= n).min() {
            Some(m) => m,
            None => break,
        };
        delta = (m - n)
            .checked_mul(handled + 1)
            .and_then(|x| delta.checked_add(x))
            .ok_or(PunycodeError::Overflow)?;
        n = m;

        for &c in &points {
            if c < n {
                delta = delta.checked_add(1).ok_or(PunycodeError::Overflow)?;
            }
            if c == n {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    out.push(digit_char(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                out.push(digit_char(q));
                bias = adapt(delta, handled + 1, handled == basic);
                delta = 0;
                handled += 1;
            }
        }
        delta += 1;
        n += 1;
    }
    Ok(out)
}

fn decode(input: &str) -> Result<String, PunycodeError> {
    let (basic, deltas) = match input.rfind('-') {
        Some(i) => (&input[..i], &input[i + 1..]),
        None => ("", input),
    };
    if !basic.is_ascii() {
        return Err(PunycodeError::InvalidDigit);
    }
    let mut out: Vec<char> = basic.chars().collect();

    let mut n = INITIAL_N;
    let mut i: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut chars = deltas.chars();

    loop {
        // Consume one generalized variable-length integer.
        let mut digit = match chars.next() {
            Some(c) => digit_value(c).ok_or(PunycodeError::InvalidDigit)?,
            None => break,
        };
        let old_i = i;
        let mut w: u32 = 1;
        let mut k = BASE;
        loop {
            i = digit
                .checked_mul(w)
                .and_then(|x| i.checked_add(x))
                .ok_or(PunycodeError::Overflow)?;
            let t = threshold(k, bias);
            if digit < t {
                break;
            }
            w = w
                .checked_mul(BASE - t)
                .ok_or(PunycodeError::Overflow)?;
            k += BASE;
            digit = match chars.next() {
                Some(c) => digit_value(c).ok_or(PunycodeError::InvalidDigit)?,
                None => return Err(PunycodeError::UnexpectedEnd),
            };
        }

        let len = out.len() as u32 + 1;
        bias = adapt(i - old_i, len, old_i == 0);
        n = n
            .checked_add(i / len)
            .ok_or(PunycodeError::Overflow)?;
        i %= len;

        let c = char::from_u32(n).ok_or(PunycodeError::InvalidCodePoint)?;
        out.insert(i as usize, c);
        i += 1;
    }
    Ok(out.into_iter().collect())
}
