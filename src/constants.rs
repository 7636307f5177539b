use std::time::Duration;

// Audit action names
pub const ROOM_CREATED: &str = "room_created";
pub const MEMBER_ADDED: &str = "member_added";
pub const EXPENSE_ADDED: &str = "expense_added";
pub const EXPENSE_STATUS_CHANGED: &str = "expense_status_changed";
pub const SETTLEMENT_QUERIED: &str = "settlement_queried";
pub const PAIRWISE_QUERIED: &str = "pairwise_queried";
pub const ANALYTICS_QUERIED: &str = "analytics_queried";

/// How long a cached settlement report stays valid before the next read
/// recomputes it. Writes invalidate eagerly, so this only bounds staleness
/// when another process mutates the store.
pub const SETTLEMENT_CACHE_TTL: Duration = Duration::from_secs(60);

/// Number of buckets in the monthly spend trend (current month plus the
/// five preceding).
pub const TREND_MONTHS: usize = 6;

/// Categories shown individually in the category-share view; the rest
/// collapse into "Other".
pub const CATEGORY_SHARE_LIMIT: usize = 5;

/// Upper bound on a single expense amount.
pub const MAX_EXPENSE_AMOUNT: u32 = 1_000_000;
