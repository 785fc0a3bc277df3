//! Shared constants for chatio.
//!
//! Defaults for search tuning and connection pooling live here so the HTTP,
//! CLI and service crates agree on them.

/// Maximum number of results for any query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default number of search results when the caller does not pass `limit`.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default minimum cosine similarity for a message to count as a match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.45;

/// Upper bound on rows fetched for in-process ranking.
/// Ranking cost is O(candidates × dimensions), so this keeps a request predictable.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 100;

/// Embedding vector dimension requested from the provider (768d).
pub const EMBEDDING_DIMENSION: usize = 768;

/// Decimal places kept in the emitted similarity score.
pub const SIMILARITY_DECIMALS: i32 = 4;

/// Name of the database-side similarity function probed at startup.
pub const MATCH_MESSAGES_FUNCTION: &str = "match_messages";

/// Default batch size for embedding backfill.
pub const DEFAULT_BACKFILL_BATCH_SIZE: usize = 10;

/// Default cap on messages embedded by one backfill run.
pub const DEFAULT_BACKFILL_LIMIT: usize = 100;
