//! Scalar and tuple value parsers shared by directive handlers.

use crate::foundation::core::{Offset, Rect, Rgba8};

/// Parse a boolean directive value.
///
/// `y`/`true` and `n`/`false` are recognised case-insensitively; anything else yields
/// `default`.
pub fn parse_bool(value: &str, default: bool) -> bool {
    let v = value.trim();
    if v.eq_ignore_ascii_case("y") || v.eq_ignore_ascii_case("true") {
        true
    } else if v.eq_ignore_ascii_case("n") || v.eq_ignore_ascii_case("false") {
        false
    } else {
        default
    }
}

/// Parse a leading decimal integer, ignoring trailing garbage (`"20px"` -> 20).
///
/// Returns `None` when no digits are present.
pub fn parse_leading_int(value: &str) -> Option<i32> {
    let trimmed = value.trim_start();
    let len = int_prefix_len(trimmed);
    if len == 0 {
        return None;
    }
    trimmed[..len].parse().ok()
}

/// Scan comma separated integers into `out`, positionally.
///
/// Scanning stops at the first missing separator or malformed number; slots past that point keep
/// their prior values. Returns how many slots were written.
pub fn scan_ints(value: &str, out: &mut [i32]) -> usize {
    let mut rest = value;
    for (i, slot) in out.iter_mut().enumerate() {
        if i > 0 {
            match rest.trim_start().strip_prefix(',') {
                Some(r) => rest = r,
                None => return i,
            }
        }
        let trimmed = rest.trim_start();
        let len = int_prefix_len(trimmed);
        if len == 0 {
            return i;
        }
        let Ok(n) = trimmed[..len].parse::<i32>() else {
            return i;
        };
        *slot = n;
        rest = &trimmed[len..];
    }
    out.len()
}

/// Scan `r,g,b` into the colour channels, leaving unparsed channels untouched.
///
/// Channel values wrap into `u8` the way a byte-sized scan would.
pub fn scan_rgb(value: &str, color: &mut Rgba8) -> usize {
    let mut buf = [i32::from(color.r), i32::from(color.g), i32::from(color.b)];
    let n = scan_ints(value, &mut buf);
    color.r = buf[0] as u8;
    color.g = buf[1] as u8;
    color.b = buf[2] as u8;
    n
}

/// Scan `x,y,w,h` into a rectangle, leaving unparsed fields untouched.
pub fn scan_rect(value: &str, rect: &mut Rect) -> usize {
    let mut buf = [rect.x, rect.y, rect.w, rect.h];
    let n = scan_ints(value, &mut buf);
    *rect = Rect::new(buf[0], buf[1], buf[2], buf[3]);
    n
}

/// Scan `x,y` into an offset, leaving unparsed fields untouched.
pub fn scan_offset(value: &str, offset: &mut Offset) -> usize {
    let mut buf = [offset.x, offset.y];
    let n = scan_ints(value, &mut buf);
    *offset = Offset::new(buf[0], buf[1]);
    n
}

/// Split `name=value` at the first `=`.
pub fn split_assignment(text: &str) -> Option<(&str, &str)> {
    text.split_once('=')
}

fn int_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }
    let digits = bytes[i..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 { 0 } else { i + digits }
}

#[cfg(test)]
#[path = "../../tests/unit/config/values.rs"]
mod tests;
