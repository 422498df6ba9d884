//! Binary search over the sparse slot array.
//!
//! Probes are pair-aligned: each step looks at slots `mid` and `mid + 1`
//! and compares the target against whichever of them is occupied. A probe
//! that lands on an empty pair scans outward to the nearest occupied slot
//! on each side and narrows the window from both.

use std::cmp::Ordering;

use crate::types::{RawGapTree, WalkMode};

impl<T> RawGapTree<T> {
    /// Locate `target` according to `mode`.
    ///
    /// `InsertIndex` always yields a slot index in `0..=slot_count()`.
    /// `Locate` yields the slot holding an element `==` to `target`, or
    /// `None`; comparator-equal elements that are not `==` are skipped.
    pub(crate) fn walk(&self, target: &T, mode: WalkMode) -> Option<usize>
    where
        T: PartialEq,
    {
        match mode {
            WalkMode::InsertIndex => Some(self.insert_index(target)),
            WalkMode::Locate => self.locate_by(target, |candidate| candidate == target),
        }
    }

    /// Slot index at which `target` can be placed without breaking order.
    ///
    /// Equal elements already present stay in front of the new one. When
    /// the neighbours of the insertion point have empty slots between them,
    /// the index of the middle empty slot is returned; otherwise the index
    /// of the first element that sorts after `target` (or the slot count).
    pub(crate) fn insert_index(&self, target: &T) -> usize {
        let boundary =
            self.partition_point(|elem| self.comparator.compare(elem, target) != Ordering::Greater);

        let before = self.last_occupied_before(boundary);
        let after = self.first_occupied_from(boundary);

        let low = before.map_or(-1, |i| i as isize);
        let high = after as isize;
        if high - low >= 2 {
            ((low + high) / 2) as usize
        } else {
            after
        }
    }

    /// Find the slot of a comparator-equal element for which `matches`
    /// holds, scanning the whole run of comparator-equal elements.
    pub(crate) fn locate_by<F>(&self, target: &T, matches: F) -> Option<usize>
    where
        F: Fn(&T) -> bool,
    {
        let start =
            self.partition_point(|elem| self.comparator.compare(elem, target) == Ordering::Less);

        for index in start..self.slots.len() {
            let Some(elem) = &self.slots[index] else {
                continue;
            };
            if self.comparator.compare(elem, target) != Ordering::Equal {
                return None;
            }
            if matches(elem) {
                return Some(index);
            }
        }
        None
    }

    /// Smallest slot index `b` such that every occupied slot before `b`
    /// satisfies `pred` and every occupied slot at or after `b` does not.
    /// `pred` must be monotone over the elements in slot order.
    fn partition_point<P>(&self, pred: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        let mut lo = 0;
        let mut hi = self.slots.len();

        while lo < hi {
            let mid = (((lo + hi) / 2) & !1).max(lo);
            let high_in_window = mid + 1 < hi;

            match (&self.slots[mid], high_in_window) {
                (Some(low), _) => {
                    if !pred(low) {
                        hi = mid;
                        continue;
                    }
                    match self.slots.get(mid + 1) {
                        Some(Some(high)) if high_in_window => {
                            if pred(high) {
                                lo = mid + 2;
                            } else {
                                // Target falls between the two members.
                                lo = mid + 1;
                                hi = mid + 1;
                            }
                        }
                        _ => lo = (mid + 2).min(hi),
                    }
                }
                (None, true) if self.slots[mid + 1].is_some() => {
                    let high = self.slots[mid + 1].as_ref();
                    if high.is_some_and(&pred) {
                        lo = mid + 2;
                    } else {
                        hi = mid;
                    }
                }
                (None, _) => {
                    let above = (mid + 1..hi).find(|&k| self.slots[k].is_some());
                    let below = (lo..mid).rev().find(|&k| self.slots[k].is_some());

                    if let Some(j) = above {
                        if self.slots[j].as_ref().is_some_and(&pred) {
                            lo = j + 1;
                            continue;
                        }
                    }
                    match below {
                        Some(i) if self.slots[i].as_ref().is_some_and(&pred) => {
                            // Bracketed: everything between i and the next
                            // occupied slot is a gap.
                            lo = i + 1;
                            hi = i + 1;
                        }
                        Some(i) => hi = i,
                        None => hi = lo,
                    }
                }
            }
        }
        lo
    }

    fn last_occupied_before(&self, index: usize) -> Option<usize> {
        (0..index).rev().find(|&k| self.slots[k].is_some())
    }

    fn first_occupied_from(&self, index: usize) -> usize {
        (index..self.slots.len())
            .find(|&k| self.slots[k].is_some())
            .unwrap_or(self.slots.len())
    }
}
