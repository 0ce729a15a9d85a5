//! Geometry primitives: [`Cell`], [`Bounds`], [`Segment`] and [`Vec3`].
//!
//! Cells and bounds live in a structure's local integer grid. [`Vec3`] is the
//! floating-point counterpart used by playback to place markers between
//! cell centres.

use std::fmt;
use std::ops::{Add, Mul, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A 3D integer cell coordinate in structure-local space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new cell.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a cell shifted by (dx, dy, dz), or `None` if any coordinate
    /// would leave the `i32` range.
    #[inline]
    pub fn checked_shift(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// The axis-aligned neighbours in the order +x, -x, +y, -y, +z, -z.
    /// Neighbours past the edge of the coordinate range are skipped.
    #[inline]
    pub fn neighbors_6(self) -> impl Iterator<Item = Cell> {
        const STEPS: [(i32, i32, i32); 6] = [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];
        STEPS
            .into_iter()
            .filter_map(move |(dx, dy, dz)| self.checked_shift(dx, dy, dz))
    }

    /// Centre of the cell in local space, for a grid of `cell_size` units.
    #[inline]
    pub fn to_vec3(self, cell_size: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * cell_size,
            self.y as f32 * cell_size,
            self.z as f32 * cell_size,
        )
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.z
            .cmp(&other.z)
            .then(self.y.cmp(&other.y))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Cell {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An inclusive box \[min, max\] of cells. Both corners belong to the box.
///
/// Deserialized bounds go through [`Bounds::new`], so swapped corners load
/// canonicalized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "RawBounds")
)]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    /// Create bounds from two corners, canonicalizing so that `min` ≤ `max`
    /// on each axis.
    #[inline]
    pub fn new(a: Cell, b: Cell) -> Self {
        Self {
            min: Cell::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Cell::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Number of cells along each axis (x, y, z). Zero on an axis where
    /// `min` > `max`.
    #[inline]
    pub fn size(self) -> [u64; 3] {
        let span = |lo: i32, hi: i32| (i64::from(hi) - i64::from(lo) + 1).max(0) as u64;
        [
            span(self.min.x, self.max.x),
            span(self.min.y, self.max.y),
            span(self.min.z, self.max.z),
        ]
    }

    /// Total number of cells in the box, saturating at `u64::MAX`.
    #[inline]
    pub fn volume(self) -> u64 {
        let [x, y, z] = self.size();
        x.saturating_mul(y).saturating_mul(z)
    }

    /// Whether every face has a representable cell just outside it, i.e. no
    /// face lies on `i32::MIN` or `i32::MAX`.
    #[inline]
    pub fn has_exterior(self) -> bool {
        let inner = |lo: i32, hi: i32| lo > i32::MIN && hi < i32::MAX;
        inner(self.min.x, self.max.x)
            && inner(self.min.y, self.max.y)
            && inner(self.min.z, self.max.z)
    }

    /// Whether `c` lies inside the box (inclusive on both ends).
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.x >= self.min.x
            && c.x <= self.max.x
            && c.y >= self.min.y
            && c.y <= self.max.y
            && c.z >= self.min.z
            && c.z <= self.max.z
    }

    /// Whether `c` lies on the outer shell of the box.
    #[inline]
    pub fn on_shell(self, c: Cell) -> bool {
        self.contains(c)
            && (c.x == self.min.x
                || c.x == self.max.x
                || c.y == self.min.y
                || c.y == self.max.y
                || c.z == self.min.z
                || c.z == self.max.z)
    }

    /// Iterate over every cell, x fastest, then y, then z.
    pub fn iter(self) -> impl Iterator<Item = Cell> {
        (self.min.z..=self.max.z).flat_map(move |z| {
            (self.min.y..=self.max.y)
                .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Cell::new(x, y, z)))
        })
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBounds {
    min: Cell,
    max: Cell,
}

#[cfg(feature = "serde")]
impl From<RawBounds> for Bounds {
    fn from(raw: RawBounds) -> Self {
        Self::new(raw.min, raw.max)
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One edge of a reconstructed path, in structure-local space.
///
/// A path is a sequence of segments ordered from the exit point back toward
/// the start point, so `segments[0].from` is the exit cell and
/// `segments.last().to` is the start cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub from: Cell,
    pub to: Cell,
}

impl Segment {
    #[inline]
    pub const fn new(from: Cell, to: Cell) -> Self {
        Self { from, to }
    }

    /// Length in cell steps (Manhattan).
    #[inline]
    pub fn steps(self) -> u64 {
        let (a, b) = (self.from, self.to);
        u64::from(a.x.abs_diff(b.x))
            + u64::from(a.y.abs_diff(b.y))
            + u64::from(a.z.abs_diff(b.z))
    }

    /// Point at fraction `t` (0 = `from`, 1 = `to`) along the segment.
    #[inline]
    pub fn lerp(self, t: f32, cell_size: f32) -> Vec3 {
        self.from
            .to_vec3(cell_size)
            .lerp(self.to.to_vec3(cell_size), t)
    }
}

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A floating-point position or direction in structure-local space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn distance(self, rhs: Self) -> f32 {
        (self - rhs).length()
    }

    /// Linear interpolation: `self` at `t = 0`, `rhs` at `t = 1`.
    #[inline]
    pub fn lerp(self, rhs: Self, t: f32) -> Self {
        self + (rhs - self) * t
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cell_arithmetic() {
        let a = Cell::new(1, 2, 3);
        let b = Cell::new(4, 5, 6);
        assert_eq!(a + b, Cell::new(5, 7, 9));
        assert_eq!(b - a, Cell::new(3, 3, 3));
        assert_eq!(a * 2, Cell::new(2, 4, 6));
    }

    #[test]
    fn neighbors_are_unit_steps() {
        let c = Cell::new(2, 2, 2);
        let ns: HashSet<Cell> = c.neighbors_6().collect();
        assert_eq!(ns.len(), 6);
        for n in ns {
            let d = n - c;
            assert_eq!(d.x.abs() + d.y.abs() + d.z.abs(), 1);
        }
    }

    #[test]
    fn neighbors_stop_at_coordinate_limits() {
        let corner = Cell::new(i32::MAX, i32::MIN, 0);
        let ns: Vec<Cell> = corner.neighbors_6().collect();
        assert_eq!(
            ns,
            vec![
                Cell::new(i32::MAX - 1, i32::MIN, 0),
                Cell::new(i32::MAX, i32::MIN + 1, 0),
                Cell::new(i32::MAX, i32::MIN, 1),
                Cell::new(i32::MAX, i32::MIN, -1),
            ]
        );
        assert_eq!(Cell::new(i32::MAX, 0, 0).checked_shift(1, 0, 0), None);
    }

    #[test]
    fn bounds_canonicalize_and_contain() {
        let b = Bounds::new(Cell::new(4, 0, 4), Cell::new(0, 4, 0));
        assert_eq!(b.min, Cell::ZERO);
        assert_eq!(b.max, Cell::new(4, 4, 4));
        assert!(b.contains(Cell::new(0, 0, 0)));
        assert!(b.contains(Cell::new(4, 4, 4)));
        assert!(!b.contains(Cell::new(5, 2, 2)));
        assert!(!b.contains(Cell::new(2, -1, 2)));
    }

    #[test]
    fn bounds_volume_matches_iter() {
        let b = Bounds::new(Cell::new(-1, 0, 2), Cell::new(1, 3, 2));
        assert_eq!(b.size(), [3, 4, 1]);
        assert_eq!(b.volume(), 12);
        let cells: Vec<_> = b.iter().collect();
        assert_eq!(cells.len(), 12);
        assert_eq!(cells[0], Cell::new(-1, 0, 2));
        assert_eq!(cells[1], Cell::new(0, 0, 2));
        assert_eq!(*cells.last().unwrap(), Cell::new(1, 3, 2));
    }

    #[test]
    fn extreme_bounds_measure_without_overflow() {
        let wide = Bounds::new(Cell::new(i32::MIN, 0, 0), Cell::new(i32::MAX, 4, 4));
        assert_eq!(wide.size(), [1u64 << 32, 5, 5]);
        assert_eq!(wide.volume(), 25u64 << 32);
        assert!(!wide.has_exterior());

        let full = Bounds::new(
            Cell::new(i32::MIN, i32::MIN, i32::MIN),
            Cell::new(i32::MAX, i32::MAX, i32::MAX),
        );
        assert_eq!(full.volume(), u64::MAX);

        let inner = Bounds::new(Cell::new(i32::MIN + 1, 0, 0), Cell::new(i32::MAX - 1, 4, 4));
        assert!(inner.has_exterior());

        let inverted = Bounds {
            min: Cell::new(4, 0, 0),
            max: Cell::ZERO,
        };
        assert_eq!(inverted.volume(), 0);
    }

    #[test]
    fn shell_membership() {
        let b = Bounds::new(Cell::ZERO, Cell::new(4, 4, 4));
        assert!(b.on_shell(Cell::new(0, 2, 2)));
        assert!(b.on_shell(Cell::new(2, 2, 4)));
        assert!(!b.on_shell(Cell::new(2, 2, 2)));
        assert!(!b.on_shell(Cell::new(5, 2, 2)));
    }

    #[test]
    fn segment_lerp_scales_by_cell_size() {
        let s = Segment::new(Cell::new(0, 0, 0), Cell::new(1, 0, 0));
        assert_eq!(s.lerp(0.5, 2.5), Vec3::new(1.25, 0.0, 0.0));
        assert_eq!(s.lerp(1.0, 1.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(s.steps(), 1);
        assert_eq!(Segment::new(Cell::new(2, 0, 1), Cell::new(0, 1, 1)).steps(), 3);
    }

    #[test]
    fn vec3_distance() {
        let a = Vec3::new(0.0, 3.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
        assert_eq!(a.dot(b), 0.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn bounds_from_json() {
        let json = r#"{"min":{"x":0,"y":0,"z":0},"max":{"x":4,"y":4,"z":4}}"#;
        let b: Bounds = serde_json::from_str(json).unwrap();
        assert_eq!(b.volume(), 125);
    }

    #[test]
    fn swapped_json_corners_are_canonicalized() {
        let json = r#"{"min":{"x":4,"y":0,"z":4},"max":{"x":0,"y":4,"z":0}}"#;
        let b: Bounds = serde_json::from_str(json).unwrap();
        assert_eq!(b.min, Cell::ZERO);
        assert_eq!(b.max, Cell::new(4, 4, 4));
        assert_eq!(b.volume(), 125);

        let back = serde_json::to_string(&b).unwrap();
        assert_eq!(serde_json::from_str::<Bounds>(&back).unwrap(), b);
    }
}
