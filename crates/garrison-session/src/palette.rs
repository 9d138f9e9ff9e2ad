//! Categorical colors for NPC types
//!
//! Ten well-separated colors, assigned to sorted unique type names and
//! cycled when a script has more types than the palette.

use garrison_core::Color;
use std::collections::HashMap;

const PALETTE: [u32; 10] = [
    0x1F77B4, 0xFF7F0E, 0x2CA02C, 0xD62728, 0x9467BD, 0x8C564B, 0xE377C2, 0x7F7F7F, 0xBCBD22,
    0x17BECF,
];

/// Assign a stable color per type name. Names are sorted before
/// assignment, so the mapping does not depend on record order.
pub fn type_colors(types: &[String]) -> HashMap<String, Color> {
    let mut unique: Vec<&String> = types.iter().collect();
    unique.sort();
    unique.dedup();

    unique
        .into_iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), Color::from_hex(PALETTE[i % PALETTE.len()])))
        .collect()
}
