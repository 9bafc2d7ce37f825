/// Renders a finite value as a plain decimal string.
///
/// The output never uses exponent notation, so it tokenizes back to the same
/// value and can seed a chained calculation.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}
