/*!
    Saturating integer narrowing.
*/

/**
    Convert an `i64` to an `i32`, clamping values outside the `i32` range
    to its nearest bound.

    Useful when reading 64-bit integer properties into 32-bit fields.
*/
#[inline]
pub const fn int64_to_int_saturating(i: i64) -> i32 {
    if i > i32::MAX as i64 {
        i32::MAX
    } else if i < i32::MIN as i64 {
        i32::MIN
    } else {
        i as i32
    }
}
