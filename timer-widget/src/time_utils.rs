use std::sync::OnceLock;
use time::{OffsetDateTime, UtcOffset};

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// The local UTC offset, read on first call. `time` refuses to read it once other threads
/// exist, so the first call has to happen before the tokio runtime is built.
pub fn local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    dt.to_offset(local_offset())
}

/// Elapsed time between `start` and `now` as `H:MM`, truncated to whole minutes.
/// A start in the future (clock skew) reads as `0:00`.
pub fn format_elapsed(start: OffsetDateTime, now: OffsetDateTime) -> String {
    let minutes = (now - start).whole_minutes().max(0);
    format!("{}:{:02}", minutes / 60, minutes % 60)
}
