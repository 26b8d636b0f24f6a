//! Easing curves for playback progress

/// Cubic ease-in-out: slow start, fast middle, slow end.
///
/// Input is clamped to [0, 1]; `ease_in_out_cubic(1.0)` is exactly `1.0`,
/// which the driver relies on to detect a finished play-through.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
