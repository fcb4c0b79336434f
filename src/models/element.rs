use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which arm of the rig an element belongs to. Top elements run horizontally,
/// side elements vertically; several effects partition on this.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, TS)]
#[ts(export, export_to = "../bindings/elements.ts")]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    Top,
    Side,
}

/// Per-element output of one frame evaluation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, TS)]
#[ts(export, export_to = "../bindings/elements.ts")]
#[serde(rename_all = "camelCase")]
pub struct ElementFrame {
    /// Stable id, `top-{i}` or `side-{i}`.
    pub id: String,
    pub orientation: Orientation,
    /// Index within the orientation group, 0-based.
    pub index: usize,
    /// Position along the element's own arm, 0-100 percent. Renderers place
    /// elements and fixtures in this shared coordinate space.
    pub position: f32,
    /// Final composited brightness, 0-255.
    pub brightness: u8,
}

/// Summary of a computed frame, for host status displays.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, TS)]
#[ts(export, export_to = "../bindings/elements.ts")]
#[serde(rename_all = "camelCase")]
pub struct FrameStats {
    pub total: usize,
    pub active: usize,
    pub max_brightness: u8,
    pub mean_brightness: f32,
}

impl FrameStats {
    pub fn from_frame(frame: &[ElementFrame]) -> Self {
        let lit: Vec<u8> = frame
            .iter()
            .filter(|e| e.brightness > 0)
            .map(|e| e.brightness)
            .collect();
        let mean = if lit.is_empty() {
            0.0
        } else {
            lit.iter().map(|&b| b as f32).sum::<f32>() / lit.len() as f32
        };
        Self {
            total: frame.len(),
            active: lit.len(),
            max_brightness: lit.iter().copied().max().unwrap_or(0),
            mean_brightness: mean,
        }
    }
}
