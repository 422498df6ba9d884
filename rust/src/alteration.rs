//! Replace an element with a transformed copy of itself.
//!
//! The replacement may sort somewhere else, so alteration is always a
//! remove followed by an insert, never an in-place write.

use crate::error::{GapTreeError, ModifyResult};
use crate::types::RawGapTree;

impl<T: PartialEq> RawGapTree<T> {
    /// Remove the element `==` to `item`, pass it through `transform`, and
    /// insert the result.
    ///
    /// Fails with `NotFound`, leaving the tree untouched, if `item` is not
    /// present.
    pub fn alter<F>(&mut self, item: &T, transform: F) -> ModifyResult<()>
    where
        F: FnOnce(T) -> T,
    {
        let current = self
            .remove_by(item, |candidate| candidate == item)
            .ok_or(GapTreeError::NotFound)?;
        self.insert(transform(current));
        Ok(())
    }

    /// Like [`alter`](Self::alter), reporting a missing element as `false`.
    pub fn try_alter<F>(&mut self, item: &T, transform: F) -> bool
    where
        F: FnOnce(T) -> T,
    {
        self.alter(item, transform).is_ok()
    }
}
