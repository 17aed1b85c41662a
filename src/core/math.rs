// Math utilities and helper functions

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Position of `value` inside `[start, end]` as a fraction (unclamped)
pub fn inverse_lerp(start: f64, end: f64, value: f64) -> f64 {
    (value - start) / (end - start)
}

/// Sign of a value as -1, 0 or 1 (unlike `f64::signum`, zero maps to zero)
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rescale `|value|` from `[min, max]` onto `[0, 1]` and put the sign back.
///
/// Everything at or below `min` collapses to zero, everything at or above
/// `max` saturates to +/-1. A degenerate range (`max <= min`) acts as a step.
pub fn deadzone(value: f64, min: f64, max: f64) -> f64 {
    let magnitude = value.abs();
    if max <= min {
        return if magnitude > min { sign(value) } else { 0.0 };
    }
    clamp(inverse_lerp(min, max, magnitude), 0.0, 1.0) * sign(value)
}

/// Snap a value to its sign once its magnitude reaches `threshold`, else zero
pub fn binarize(value: f64, threshold: f64) -> f64 {
    if value.abs() >= threshold {
        sign(value)
    } else {
        0.0
    }
}
