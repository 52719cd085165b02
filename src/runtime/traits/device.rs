//! Trait for device identification

/// Trait for device identification
///
/// Operand validation compares devices through [`Device::is_same`], so a
/// backend with multiple devices (e.g. several GPUs) only needs distinct ids.
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}
