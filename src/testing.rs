use std::cell::Cell;

thread_local! {
    /// Whether the most recent memoized call on this thread was answered
    /// from its table.
    static LAST_WAS_HIT: Cell<bool> = const { Cell::new(false) };
}

/// Whether the last memoized call was a hit.
pub fn last_was_hit() -> bool {
    LAST_WAS_HIT.with(Cell::get)
}

/// Record the outcome of a memoized call.
pub(crate) fn register(hit: bool) {
    LAST_WAS_HIT.with(|cell| cell.set(hit));
}
