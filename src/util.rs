/// Logs how long a scope took when it is dropped.
pub struct ScopedTimer {
    name: String,
    start: std::time::Instant,
}

impl ScopedTimer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        log::debug!("{}: {:.2?}", self.name, self.start.elapsed());
    }
}

/// Normalize an ISO-8601 / RFC 3339 timestamp to UTC with millisecond
/// precision, e.g. `2024-01-01T10:00:00.000Z`. Normalized keys sort
/// chronologically as plain strings.
pub fn normalize_timestamp(timestamp: &str) -> anyhow::Result<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(timestamp.trim())
        .map_err(|e| anyhow::anyhow!("Invalid timestamp {:?}: {}", timestamp, e))?;
    Ok(parsed
        .with_timezone(&chrono::Utc)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_normalize_to_utc() {
        assert_eq!(
            normalize_timestamp("2024-01-01T12:00:00+02:00").unwrap(),
            "2024-01-01T10:00:00.000Z"
        );
        assert_eq!(
            normalize_timestamp(" 2024-05-06T07:08:09.123456Z").unwrap(),
            "2024-05-06T07:08:09.123Z"
        );
        assert!(normalize_timestamp("yesterday").is_err());
    }

    #[test]
    fn now_is_normalized() {
        let now = now_timestamp();
        assert_eq!(normalize_timestamp(&now).unwrap(), now);
        assert!(now.ends_with('Z'));
    }
}
