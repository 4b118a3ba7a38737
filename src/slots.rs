//! Three-slot render ring for the film strip.
//!
//! The lightbox keeps exactly three render surfaces alive — one per slot
//! role (`prev`, `current`, `next`) — and navigation relabels them instead
//! of rebuilding all three. A committed navigation is a pure role
//! reassignment: the exposed neighbor becomes current, the old current
//! becomes the near neighbor, and the surface that just went off-screen is
//! the only one whose content must be rebuilt. The rendering surface ids
//! are stable for the whole session, so hosts can map them to long-lived
//! DOM nodes or widgets without flicker.

use crate::gesture::Direction;

/// Stable identifier of one render surface. Ids are `0..3` and never
/// change for the lifetime of a session; only their roles rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub u8);

/// Role a slot currently plays in the film strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRole {
    Prev,
    Current,
    Next,
}

/// Ring of three slots keyed by role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRing {
    // Index 0 = prev, 1 = current, 2 = next
    by_role: [SlotId; 3],
}

impl SlotRing {
    pub fn new() -> Self {
        Self {
            by_role: [SlotId(0), SlotId(1), SlotId(2)],
        }
    }

    pub fn slot(&self, role: SlotRole) -> SlotId {
        self.by_role[role_index(role)]
    }

    /// All slots in strip order `[prev, current, next]`.
    pub fn in_order(&self) -> [SlotId; 3] {
        self.by_role
    }

    /// Rotate roles after a committed navigation and return the slot whose
    /// content must be rebuilt — the one now holding the new far neighbor.
    ///
    /// Navigating next: next becomes current, current becomes prev, and the
    /// old prev surface wraps around to hold the new next photo. Mirrored
    /// for prev.
    pub fn rotate(&mut self, direction: Direction) -> SlotId {
        let [prev, current, next] = self.by_role;
        match direction {
            Direction::Next => {
                self.by_role = [current, next, prev];
                prev
            }
            Direction::Prev => {
                self.by_role = [next, prev, current];
                next
            }
        }
    }
}

impl Default for SlotRing {
    fn default() -> Self {
        Self::new()
    }
}

fn role_index(role: SlotRole) -> usize {
    match role {
        SlotRole::Prev => 0,
        SlotRole::Current => 1,
        SlotRole::Next => 2,
    }
}
