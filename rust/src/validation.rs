//! Validation and debugging utilities for GapTree.
//!
//! This module contains invariant checking, slot-layout dumps for debugging,
//! and the operation-scoped validation helper.

use std::cmp::Ordering;

use crate::error::{GapResult, GapTreeError};
use crate::types::RawGapTree;

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<T> RawGapTree<T> {
    /// Check if the slot array maintains the gap tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    pub fn check_invariants_detailed(&self) -> Result<(), String> {
        if self.slots.len() % 2 != 0 {
            return Err(format!("Slot array has odd length {}", self.slots.len()));
        }

        let occupied = self.slots.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.count {
            return Err(format!(
                "Count is {} but {} slots are occupied",
                self.count, occupied
            ));
        }

        self.check_order()
    }

    /// Check that occupied slots, read front to back, never step backwards
    /// under the comparator.
    fn check_order(&self) -> Result<(), String> {
        let mut previous: Option<(usize, &T)> = None;
        for (index, slot) in self.slots.iter().enumerate() {
            let Some(item) = slot else { continue };
            if let Some((prev_index, prev)) = previous {
                if self.comparator.compare(prev, item) == Ordering::Greater {
                    return Err(format!(
                        "Slot {} is ordered after slot {}",
                        prev_index, index
                    ));
                }
            }
            previous = Some((index, item));
        }
        Ok(())
    }

    // ============================================================================
    // DEBUGGING AND TESTING UTILITIES
    // ============================================================================

    /// Alias for check_invariants_detailed.
    pub fn validate(&self) -> Result<(), String> {
        self.check_invariants_detailed()
    }

    /// Returns the number of occupied slots in each pair.
    pub fn pair_fills(&self) -> Vec<usize> {
        self.slots
            .chunks(2)
            .map(|pair| pair.iter().filter(|slot| slot.is_some()).count())
            .collect()
    }

    /// Renders the slot layout as `X` for elements and `_` for gaps, pairs
    /// separated by spaces.
    pub fn occupancy_pattern(&self) -> String {
        self.slots
            .chunks(2)
            .map(|pair| {
                pair.iter()
                    .map(|slot| if slot.is_some() { 'X' } else { '_' })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Prints the slot pairs for debugging.
    pub fn print_slot_pairs(&self)
    where
        T: std::fmt::Debug,
    {
        println!(
            "GapTree: {} elements in {} slots (ratio {:.3})",
            self.count,
            self.slots.len(),
            self.fill_ratio()
        );
        for (pair, slots) in self.slots.chunks(2).enumerate() {
            println!("  pair {:>4}: {:?}", pair, slots);
        }
    }

    // ============================================================================
    // VALIDATION HELPERS FOR OPERATIONS
    // ============================================================================

    /// Check if the tree is in a valid state for an operation.
    pub fn validate_for_operation(&self, operation: &str) -> GapResult<()> {
        self.check_invariants_detailed()
            .map_err(|e| GapTreeError::invariant_violation(operation, &e))
    }
}
