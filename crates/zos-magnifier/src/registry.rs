//! Region registry and point-containment index
//!
//! A fixed table of `(rect, value)` entries answering "which region owns
//! this point". The population is small and bounded, so lookup is a linear
//! scan in insertion order; the first matching entry wins on overlap.

use crate::error::{MagnifierError, MagnifierResult};
use crate::math::ScreenRect;

/// Maximum number of simultaneous magnifier regions
pub const REGION_CAPACITY: usize = 64;

/// Raw sentinel for a lookup that matched nothing
///
/// `RegionRegistry::find` returns `None` instead; this constant is for
/// callers that forward results over integer-only interfaces.
pub const NOT_FOUND: i32 = -1;

/// One registry entry
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Bounding rectangle in screen pixels
    pub rect: ScreenRect,
    /// Opaque tag supplied by the caller
    pub value: i32,
}

/// Fixed-capacity, insertion-ordered region table
#[derive(Clone, Debug)]
pub struct RegionRegistry {
    entries: [RegistryEntry; REGION_CAPACITY],
    len: usize,
}

impl RegionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: [RegistryEntry::default(); REGION_CAPACITY],
            len: 0,
        }
    }

    /// Append a mapping and return its slot
    ///
    /// Fails with `CapacityExceeded` when all slots are live; the table is
    /// left untouched in that case.
    pub fn insert(&mut self, rect: ScreenRect, value: i32) -> MagnifierResult<usize> {
        if self.len >= REGION_CAPACITY {
            return Err(MagnifierError::CapacityExceeded {
                capacity: REGION_CAPACITY,
            });
        }
        let slot = self.len;
        self.entries[slot] = RegistryEntry { rect, value };
        self.len += 1;
        Ok(slot)
    }

    /// Value of the first entry whose rectangle contains the point
    pub fn find(&self, x: i32, y: i32) -> Option<i32> {
        self.live()
            .iter()
            .find(|entry| entry.rect.contains(x, y))
            .map(|entry| entry.value)
    }

    /// Like `find`, but reports a miss as `NOT_FOUND`
    pub fn find_raw(&self, x: i32, y: i32) -> i32 {
        self.find(x, y).unwrap_or(NOT_FOUND)
    }

    /// Replace the rectangle of a live entry, keeping its position and value
    pub fn update_rect(&mut self, slot: usize, rect: ScreenRect) -> MagnifierResult<()> {
        if slot >= self.len {
            return Err(MagnifierError::NotFound);
        }
        self.entries[slot].rect = rect;
        Ok(())
    }

    /// Replace the value of a live entry
    pub fn retag(&mut self, slot: usize, value: i32) -> MagnifierResult<()> {
        if slot >= self.len {
            return Err(MagnifierError::NotFound);
        }
        self.entries[slot].value = value;
        Ok(())
    }

    /// Evict the entry at `slot`; later entries shift down one slot
    pub fn remove(&mut self, slot: usize) -> MagnifierResult<RegistryEntry> {
        if slot >= self.len {
            return Err(MagnifierError::NotFound);
        }
        let removed = self.entries[slot];
        self.entries.copy_within(slot + 1..self.len, slot);
        self.len -= 1;
        self.entries[self.len] = RegistryEntry::default();
        Ok(removed)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries[..self.len].fill(RegistryEntry::default());
        self.len = 0;
    }

    /// Entry at a slot
    pub fn get(&self, slot: usize) -> Option<&RegistryEntry> {
        self.live().get(slot)
    }

    /// Live entries in insertion order
    pub fn live(&self) -> &[RegistryEntry] {
        &self.entries[..self.len]
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no entry is live
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when another insert would fail
    pub fn is_full(&self) -> bool {
        self.len >= REGION_CAPACITY
    }
}

impl Default for RegionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_inside_and_outside() {
        let mut registry = RegionRegistry::new();
        registry.insert(ScreenRect::new(0, 0, 100, 100), 7).unwrap();
        registry.insert(ScreenRect::new(200, 0, 50, 50), 9).unwrap();

        assert_eq!(registry.find(10, 10), Some(7));
        assert_eq!(registry.find(210, 49), Some(9));
        assert_eq!(registry.find(150, 10), None);
        assert_eq!(registry.find_raw(150, 10), NOT_FOUND);
    }

    #[test]
    fn test_first_inserted_wins_on_overlap() {
        let mut registry = RegionRegistry::new();
        registry.insert(ScreenRect::new(0, 0, 100, 100), 1).unwrap();
        registry.insert(ScreenRect::new(50, 50, 100, 100), 2).unwrap();

        assert_eq!(registry.find(75, 75), Some(1));
        assert_eq!(registry.find(120, 120), Some(2));
    }

    #[test]
    fn test_capacity_exceeded_leaves_state_unchanged() {
        let mut registry = RegionRegistry::new();
        for i in 0..REGION_CAPACITY as i32 {
            registry.insert(ScreenRect::new(i * 10, 0, 10, 10), i).unwrap();
        }
        assert!(registry.is_full());

        let before: Vec<RegistryEntry> = registry.live().to_vec();
        let err = registry.insert(ScreenRect::new(0, 100, 10, 10), 99);
        assert_eq!(
            err,
            Err(MagnifierError::CapacityExceeded {
                capacity: REGION_CAPACITY
            })
        );
        assert_eq!(registry.live(), before.as_slice());
        assert_eq!(registry.find(5, 105), None);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut registry = RegionRegistry::new();
        registry.insert(ScreenRect::new(0, 0, 10, 10), 0).unwrap();
        registry.insert(ScreenRect::new(10, 0, 10, 10), 1).unwrap();
        registry.insert(ScreenRect::new(20, 0, 10, 10), 2).unwrap();

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.value, 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).map(|e| e.value), Some(2));
        assert_eq!(registry.find(15, 5), None);
        assert_eq!(registry.remove(5), Err(MagnifierError::NotFound));
    }

    #[test]
    fn test_update_rect_moves_hit_area() {
        let mut registry = RegionRegistry::new();
        let slot = registry.insert(ScreenRect::new(0, 0, 10, 10), 3).unwrap();
        registry
            .update_rect(slot, ScreenRect::new(100, 100, 10, 10))
            .unwrap();

        assert_eq!(registry.find(5, 5), None);
        assert_eq!(registry.find(105, 105), Some(3));
        assert_eq!(
            registry.update_rect(4, ScreenRect::default()),
            Err(MagnifierError::NotFound)
        );
    }

    #[test]
    fn test_clear() {
        let mut registry = RegionRegistry::new();
        registry.insert(ScreenRect::new(0, 0, 10, 10), 1).unwrap();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.find(1, 1), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = ScreenRect> {
        (-2000i32..2000, -2000i32..2000, 1i32..500, 1i32..500)
            .prop_map(|(x, y, w, h)| ScreenRect::new(x, y, w, h))
    }

    proptest! {
        /// Any point inside an inserted rect resolves to the first rect covering it
        #[test]
        fn find_matches_linear_first_hit(
            rects in prop::collection::vec(rect_strategy(), 1..=REGION_CAPACITY),
            px in -2500i32..2500,
            py in -2500i32..2500,
        ) {
            let mut registry = RegionRegistry::new();
            for (i, rect) in rects.iter().enumerate() {
                registry.insert(*rect, i as i32).unwrap();
            }

            let expected = rects
                .iter()
                .position(|r| r.contains(px, py))
                .map(|i| i as i32);
            prop_assert_eq!(registry.find(px, py), expected);
        }

        /// A point inside a rect is always found when only that rect is registered
        #[test]
        fn find_inside_single_rect(rect in rect_strategy(), dx in 0.0f64..1.0, dy in 0.0f64..1.0) {
            let mut registry = RegionRegistry::new();
            registry.insert(rect, 42).unwrap();

            let px = rect.x + ((rect.width as f64) * dx) as i32;
            let py = rect.y + ((rect.height as f64) * dy) as i32;
            let px = px.min(rect.x + rect.width - 1);
            let py = py.min(rect.y + rect.height - 1);
            prop_assert_eq!(registry.find(px, py), Some(42));
        }
    }
}
