/// Default maximum number of raw segments in one chain address
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 32;
/// Hard ceiling for the chain length limit - security limit
pub const HARD_MAX_CHAIN_LENGTH: usize = 256;
/// Default maximum number of alias hops followed for one segment
pub const DEFAULT_MAX_ALIAS_DEPTH: usize = 16;
/// Hard ceiling for the alias depth limit - security limit
pub const HARD_MAX_ALIAS_DEPTH: usize = 64;
/// Default per-invocation timeout (30 seconds)
pub const DEFAULT_INVOKE_TIMEOUT_MS: u64 = 30_000;
/// Hard ceiling for the per-invocation timeout (10 minutes)
pub const HARD_MAX_INVOKE_TIMEOUT_MS: u64 = 600_000;
/// Length of a content address: unpadded base64url of a SHA-256 digest
pub const CONTENT_ADDRESS_LENGTH: usize = 43;
