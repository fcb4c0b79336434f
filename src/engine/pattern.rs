//! Static visual presets: which elements are lit before any movement or
//! modulation is applied.

use crate::engine::layout::RigLayout;
use crate::models::controls::VisualPreset;

fn lit(mask: &mut [f32], flat: usize) {
    if let Some(weight) = mask.get_mut(flat) {
        *weight = 1.0;
    }
}

fn lit_top(mask: &mut [f32], layout: &RigLayout, indices: impl IntoIterator<Item = usize>) {
    for i in indices {
        if i < layout.top_count {
            lit(mask, i);
        }
    }
}

fn lit_side(mask: &mut [f32], layout: &RigLayout, indices: impl IntoIterator<Item = usize>) {
    for i in indices {
        if i < layout.side_count {
            lit(mask, layout.top_count + i);
        }
    }
}

/// Base on/off weight per element for a preset. Matching is exhaustive over
/// the closed preset enum; there is no fallback path.
pub fn pattern_mask(preset: VisualPreset, layout: &RigLayout) -> Vec<f32> {
    let mut mask = vec![0.0; layout.total()];
    let top = layout.top_count;
    let side = layout.side_count;
    // Pattern shapes are anchored on the center of each arm.
    let tc = top / 2;
    let sc = side / 2;

    match preset {
        VisualPreset::Grid => {
            mask.iter_mut().for_each(|w| *w = 1.0);
        }
        VisualPreset::Bracket => {
            lit_top(&mut mask, layout, [0, 1, 2]);
            lit_top(&mut mask, layout, top.saturating_sub(3)..top);
            lit_side(&mut mask, layout, [0, 1, 2]);
            lit_side(&mut mask, layout, side.saturating_sub(3)..side);
        }
        VisualPreset::LBracket => {
            lit_top(&mut mask, layout, 0..5.min(top));
            lit_top(&mut mask, layout, top.saturating_sub(5)..top);
            lit_side(&mut mask, layout, 0..5.min(side));
            lit_side(&mut mask, layout, side.saturating_sub(5)..side);
        }
        VisualPreset::SCross => {
            lit_top(&mut mask, layout, tc.saturating_sub(1)..tc + 1);
            lit_side(&mut mask, layout, 2..4);
        }
        VisualPreset::Cross => {
            lit_top(&mut mask, layout, tc.saturating_sub(2)..tc + 2);
            lit_side(&mut mask, layout, 2..6);
        }
        VisualPreset::LCross => {
            lit_top(&mut mask, layout, tc.saturating_sub(3)..tc + 3);
            lit_side(&mut mask, layout, 2..8);
        }
        VisualPreset::SDblCross => {
            lit_top(&mut mask, layout, tc.saturating_sub(1)..tc + 1);
            lit_side(&mut mask, layout, [2, 3]);
            lit_side(
                &mut mask,
                layout,
                [side.saturating_sub(4), side.saturating_sub(3)],
            );
        }
        VisualPreset::DblCross => {
            lit_top(&mut mask, layout, tc.saturating_sub(2)..tc + 2);
            lit_side(&mut mask, layout, 2..6);
            lit_side(&mut mask, layout, side.saturating_sub(6)..side.saturating_sub(2));
        }
        VisualPreset::LDblCross => {
            lit_top(&mut mask, layout, tc.saturating_sub(3)..tc + 3);
            lit_side(&mut mask, layout, 2..8);
            lit_side(&mut mask, layout, side.saturating_sub(8)..side.saturating_sub(2));
        }
        VisualPreset::Cube => {
            lit_top(&mut mask, layout, [0, 1]);
            lit_top(&mut mask, layout, [top.saturating_sub(2), top.saturating_sub(1)]);
            lit_side(&mut mask, layout, [0, 1]);
            lit_side(
                &mut mask,
                layout,
                [side.saturating_sub(2), side.saturating_sub(1)],
            );
        }
        VisualPreset::FourCubes => {
            lit_top(&mut mask, layout, [0, 1, tc.saturating_sub(1), tc]);
            lit_top(&mut mask, layout, [top.saturating_sub(2), top.saturating_sub(1)]);
            lit_side(&mut mask, layout, [0, 1, sc.saturating_sub(1), sc]);
            lit_side(
                &mut mask,
                layout,
                [side.saturating_sub(2), side.saturating_sub(1)],
            );
        }
        VisualPreset::NineCubes => {
            let pairs = [0, 1, 4, 5, 8, 9, 12, 13];
            lit_top(&mut mask, layout, pairs);
            lit_side(&mut mask, layout, pairs);
        }
    }

    mask
}
