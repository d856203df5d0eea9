// Event loop timing constants
pub const POLL_INTERVAL_MS: u64 = 16;

// Key-hold bookkeeping constants
pub const HOLD_EXPIRY_MS: u64 = 150;
