use airleak_core::{Bounds, Cell};

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> u64 {
    u64::from(a.x.abs_diff(b.x))
        + u64::from(a.y.abs_diff(b.y))
        + u64::from(a.z.abs_diff(b.z))
}

/// Signed distance from `c` to the nearest face of `b`, over all three axes.
///
/// Zero on the outer shell, positive deeper inside, negative once the cell
/// is outside the box on any axis. Computed in `i64` and clamped to the
/// `i32` range, so bounds spanning the whole coordinate range are fine.
#[inline]
pub fn boundary_distance(b: &Bounds, c: Cell) -> i32 {
    let axis = |v: i32, lo: i32, hi: i32| {
        let v = i64::from(v);
        (v - i64::from(lo)).min(i64::from(hi) - v)
    };
    let d = axis(c.x, b.min.x, b.max.x)
        .min(axis(c.y, b.min.y, b.max.y))
        .min(axis(c.z, b.min.z, b.max.z));
    d.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
