//! Member colour assignment.
//!
//! Colours are handed out by registration order and wrap around once the
//! palette is exhausted, so the n-th member always gets the same colour.

/// Fixed, ordered set of member colours.
pub const PALETTE: [&str; 12] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9", "#F8C471", "#82E0AA",
];

/// Indicator colour for workouts whose member can no longer be resolved.
pub const UNASSIGNED_COLOR: &str = "#C8C8C8";

/// Returns the colour for the member registered at position `ordinal`.
pub fn assign_color(ordinal: usize) -> &'static str {
    PALETTE[ordinal % PALETTE.len()]
}
