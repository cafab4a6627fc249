use chrono::Utc;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random lowercase base-36 string of a given length.
#[must_use]
pub fn random_base36(length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rand::random_range(0..BASE36.len());
            BASE36[idx] as char
        })
        .collect()
}

/// Current time as milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
