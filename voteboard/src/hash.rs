//! Stable name hashing. The dashboard colors parties client-side with the
//! same recurrence, so the arithmetic here must stay bit-compatible with
//! 32-bit signed wraparound over UTF-16 code units.

const HUE_DEGREES: i32 = 360;

/// Hashes a display name with `hash = c + ((hash << 5) - hash)`.
///
/// Each step wraps at 32 bits, and the empty string hashes to `0`.
pub fn hash_name(name: &str) -> i32 {
    name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add((hash << 5).wrapping_sub(hash))
    })
}

/// Maps a display name onto a hue in `[0, 360)`.
///
/// Negative hashes are folded with a floor modulo so the result is never
/// negative.
#[inline]
pub fn hue_for_name(name: &str) -> u16 {
    // rem_euclid with a positive divisor always lands in 0..360
    hash_name(name).rem_euclid(HUE_DEGREES) as u16
}
