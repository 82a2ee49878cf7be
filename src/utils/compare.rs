//! Generic min / max / clamp helpers.
//!
//! These work for any `PartialOrd` type. For floating point values, NaN never compares
//! greater or less than anything, so a NaN element is simply never selected (unless it is
//! the first one, which is taken as the starting candidate).

/// Returns the greatest element. For an empty slice, `T::default()` is returned; callers
/// should not depend on this value.
pub fn max_of<T: PartialOrd + Copy + Default>(values: &[T]) -> T {
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return T::default();
    };
    iter.fold(first, |best, &v| if v > best { v } else { best })
}

/// Returns the least element, `T::default()` for an empty slice.
pub fn min_of<T: PartialOrd + Copy + Default>(values: &[T]) -> T {
    let mut iter = values.iter();
    let Some(&first) = iter.next() else {
        return T::default();
    };
    iter.fold(first, |best, &v| if v < best { v } else { best })
}

pub fn max2<T: PartialOrd>(a: T, b: T) -> T {
    if b > a { b } else { a }
}

pub fn max3<T: PartialOrd>(a: T, b: T, c: T) -> T {
    max2(max2(a, b), c)
}

pub fn min2<T: PartialOrd>(a: T, b: T) -> T {
    if b < a { b } else { a }
}

pub fn min3<T: PartialOrd>(a: T, b: T, c: T) -> T {
    min2(min2(a, b), c)
}

/// Clamps `value` into `[min, max]`, bounds inclusive. If `value` is above `max`, `max` is
/// returned, if below `min`, `min` is returned, otherwise `value` itself.
///
/// ```
/// use rs_urdf_math::compare::envelope;
/// assert_eq!(envelope(7, 0, 5), 5);
/// assert_eq!(envelope(-0.5, 0.0, 1.0), 0.0);
/// assert_eq!(envelope('k', 'a', 'z'), 'k');
/// ```
pub fn envelope<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
