pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;
pub mod transform_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for comparisons between derived coordinates.
pub const TOLERANCE: f64 = 1e-6;

/// Returns `true` if `a` and `b` differ by at most [`TOLERANCE`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Returns `true` if both coordinates of `a` and `b` are within [`TOLERANCE`].
#[must_use]
pub fn points_approx_eq(a: &Point2, b: &Point2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// Rounds `value` to `decimals` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(i32::try_from(decimals).unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Exact, hashable identity of a point, used for graph nodes.
///
/// Equality is exact field equality, ordering is lexicographic by `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointKey {
    x: u64,
    y: u64,
}

impl PointKey {
    /// Builds the key of a point. Negative zero is folded into positive zero.
    #[must_use]
    pub fn new(point: &Point2) -> Self {
        Self {
            x: normalize_zero(point.x).to_bits(),
            y: normalize_zero(point.y).to_bits(),
        }
    }

    /// Returns the point this key was built from.
    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(f64::from_bits(self.x), f64::from_bits(self.y))
    }
}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let a = self.point();
        let b = other.point();
        a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
    }
}

fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}
