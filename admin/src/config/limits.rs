// Backend request limits
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const MIN_API_TIMEOUT_SECS: u64 = 1;
pub const MAX_API_TIMEOUT_SECS: u64 = 300;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
