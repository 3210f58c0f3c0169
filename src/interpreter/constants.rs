// Constants for the interpreter

/// Default number of cells in each tape block
pub const DEFAULT_TAPE_SIZE: usize = 10;

/// Default ceiling on executed operations
pub const DEFAULT_MAX_OPERATIONS: u64 = 10_000;

/// Default memory ceiling for debugger history (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
