//! SVM Configuration
//!
//! Sizes of the three memory regions. Configuration specifies capacities
//! only; enforcement is handled by the regions themselves.

/// Default capacity of each region
pub const DEFAULT_REGION_SIZE: usize = 10 * 1024;

/// Machine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineConfig {
    /// Code region capacity, in words
    pub code_size: usize,

    /// Maximum operand stack depth, in words
    pub stack_size: usize,

    /// Heap size, in bytes
    pub heap_size: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            code_size: DEFAULT_REGION_SIZE,
            stack_size: DEFAULT_REGION_SIZE,
            heap_size: DEFAULT_REGION_SIZE,
        }
    }
}

impl MachineConfig {
    /// Create a new configuration with default sizes
    pub fn new() -> Self {
        Self::default()
    }
}
