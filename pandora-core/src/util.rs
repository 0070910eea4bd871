use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, sent as the leading parameter of every RPC
/// call.
pub fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}

/// Derive the per-session route identifier from a timestamp.  Precision is
/// dropped on purpose; two processes starting within the same coarse window
/// share an identifier, which the service tolerates.
pub fn derive_route_id(now: i64) -> String {
    format!("{:07}P", now >> 8)
}
