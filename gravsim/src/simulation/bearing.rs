//! Compass-style bearing from two orthogonal components.

/// Bearing in degrees of the component pair `(x, y)`, measured from the `y` axis
/// towards the `x` axis.
///
/// `atan(x / y)` alone cannot tell opposite quadrants apart, so the sign of `y`
/// (and of `x` when `y` is positive) selects the branch. When `y == 0` the
/// division is skipped: `x < 0` gives 270, anything else gives 90. A zero
/// vector therefore reports 90.
pub fn bearing(x: f64, y: f64) -> f64 {
    if y == 0.0 {
        return if x < 0.0 { 270.0 } else { 90.0 };
    }
    let angle = (x / y).atan().to_degrees();
    if y < 0.0 {
        180.0 + angle
    } else if x < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::bearing;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quadrants() {
        assert!(close(bearing(1.0, 1.0), 45.0));
        assert!(close(bearing(1.0, -1.0), 135.0));
        assert!(close(bearing(-1.0, -1.0), 225.0));
        assert!(close(bearing(-1.0, 1.0), 315.0));
    }

    #[test]
    fn axes() {
        assert!(close(bearing(0.0, 1.0), 0.0));
        assert!(close(bearing(0.0, -1.0), 180.0));
        assert!(close(bearing(1.0, 0.0), 90.0));
        assert!(close(bearing(-1.0, 0.0), 270.0));
    }

    #[test]
    fn zero_vector_reports_ninety() {
        assert_eq!(bearing(0.0, 0.0), 90.0);
    }
}
