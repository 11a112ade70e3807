//! # Time Grid
//!
//! The business day is cut into half-hour slots between an opening hour
//! (inclusive) and a closing hour (exclusive). With the default 7 → 20 hours this
//! gives 26 slots from `07:00` to `19:30`.

use serde::{Deserialize, Serialize};

use crate::models::time::{SLOT_MINUTES, Slot};

/// Produces the ordered half-hour slots covering `[start_hour:00, end_hour:00)`.
///
/// An empty or inverted range yields no slots. `end_hour` past 24 is treated as
/// midnight.
pub fn generate_slots(start_hour: u8, end_hour: u8) -> Vec<Slot> {
    let end_hour = end_hour.min(24);
    if start_hour >= end_hour {
        return Vec::new();
    }

    (start_hour..end_hour)
        .flat_map(|hour| {
            [0, SLOT_MINUTES]
                .into_iter()
                .map(move |minute| Slot { hour, minute })
        })
        .collect()
}

/// The slot bounds of a business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl SlotGrid {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour: end_hour.min(24),
        }
    }

    pub fn slots(&self) -> Vec<Slot> {
        generate_slots(self.start_hour, self.end_hour)
    }

    pub fn len(&self) -> usize {
        2 * self.end_hour.saturating_sub(self.start_hour) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, slot: Slot) -> bool {
        slot.hour >= self.start_hour && slot.hour < self.end_hour
    }

    /// Zero-padded `HH:MM` labels, in grid order.
    pub fn labels(&self) -> Vec<String> {
        self.slots().iter().map(Slot::to_string).collect()
    }
}
