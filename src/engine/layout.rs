use crate::models::element::Orientation;

/// Fixture grid cells per axis: integer coordinates 0..=14.
pub const GRID_CELLS: usize = 15;

/// Normalized 1-D position of `index` within a row of `count` elements, as a
/// percentage. A single element sits at the middle of its axis.
pub fn position_percent(index: usize, count: usize) -> f32 {
    if count <= 1 {
        50.0
    } else {
        index as f32 / (count - 1) as f32 * 100.0
    }
}

/// Map a fixture's integer grid coordinate onto the same percentage space the
/// elements use, so fixtures and elements share one coordinate system.
pub fn grid_percent(cell: u8) -> f32 {
    position_percent(cell as usize, GRID_CELLS)
}

/// Shape of the rig: how many elements in each arm. Fixed for a session.
///
/// Elements are addressed by a flat index: top elements first (left to
/// right), then side elements (top to bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RigLayout {
    pub top_count: usize,
    pub side_count: usize,
}

impl Default for RigLayout {
    fn default() -> Self {
        Self {
            top_count: 14,
            side_count: 14,
        }
    }
}

impl RigLayout {
    pub fn total(&self) -> usize {
        self.top_count + self.side_count
    }

    pub fn orientation_of(&self, flat: usize) -> Orientation {
        if flat < self.top_count {
            Orientation::Top
        } else {
            Orientation::Side
        }
    }

    /// Index within the element's orientation group.
    pub fn group_index(&self, flat: usize) -> usize {
        if flat < self.top_count {
            flat
        } else {
            flat - self.top_count
        }
    }

    pub fn element_id(&self, flat: usize) -> String {
        match self.orientation_of(flat) {
            Orientation::Top => format!("top-{}", flat),
            Orientation::Side => format!("side-{}", flat - self.top_count),
        }
    }

    /// Percent position of the element along its own arm.
    pub fn element_percent(&self, flat: usize) -> f32 {
        let count = match self.orientation_of(flat) {
            Orientation::Top => self.top_count,
            Orientation::Side => self.side_count,
        };
        position_percent(self.group_index(flat), count)
    }

    /// Sequential DMX address for the array itself (one channel per
    /// element), 1-based, starting at `start`.
    pub fn element_dmx_address(&self, flat: usize, start: u16) -> u16 {
        start + flat as u16
    }
}
