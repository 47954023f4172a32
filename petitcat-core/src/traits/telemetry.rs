//! Telemetry sink trait

/// Receiver for named numeric outcome fields
///
/// The head contributes `head_angle` always and `echo_distance` once an
/// alignment has completed. Serialization is up to the implementation.
pub trait TelemetrySink {
    /// Record one field, replacing any previous value with the same name
    fn record(&mut self, field: &'static str, value: i32);
}
