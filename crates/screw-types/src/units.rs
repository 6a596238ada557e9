//! Length formatting. All lengths in this workspace are millimetres.

/// Millimetres per internal length unit.
pub const MM_PER_UNIT: f64 = 1.0;

/// Cubic millimetres per litre.
pub const MM3_PER_LITRE: f64 = 1.0e6;

/// Format an internal length for user-facing messages.
pub fn format_length(value: f64) -> String {
    format!("{:.3} mm", value * MM_PER_UNIT)
}
