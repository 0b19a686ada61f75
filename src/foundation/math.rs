/// `(x * y) / 255` rounded, for 8-bit channel blending.
#[inline]
pub fn mul_div255_u16(x: u16, y: u16) -> u16 {
    let t = x * y + 128;
    (t + (t >> 8)) >> 8
}

/// Round `n` up to the next even number.
#[inline]
pub fn even_up(n: u32) -> u32 {
    if n.is_multiple_of(2) { n } else { n + 1 }
}

/// Round a non-negative length up to whole pixels, clamping at `u32::MAX`.
#[inline]
pub fn ceil_px(len: f64) -> u32 {
    if len.is_nan() || len <= 0.0 {
        return 0;
    }
    len.ceil().min(f64::from(u32::MAX)) as u32
}

/// Scale `len` by `num / den`, rounding to the nearest pixel and never returning zero.
#[inline]
pub fn scale_len(len: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return len.max(1);
    }
    let scaled = (f64::from(len) * f64::from(num) / f64::from(den)).round();
    (scaled as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
