use airleak_core::Cell;

/// Decides whether movement between two axis-adjacent cells is blocked.
///
/// Implemented by the structure being searched (closed doors, sealed hull
/// plates, solid blocks). `to` may lie just outside the structure's bounds
/// when the search probes an exit.
pub trait ConnectivityOracle {
    /// `true` if moving from `from` to the adjacent `to` is not possible.
    fn is_blocked(&self, from: Cell, to: Cell) -> bool;
}

impl<F> ConnectivityOracle for F
where
    F: Fn(Cell, Cell) -> bool,
{
    #[inline]
    fn is_blocked(&self, from: Cell, to: Cell) -> bool {
        self(from, to)
    }
}
