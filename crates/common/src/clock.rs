use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Current UTC time as an RFC 3339 timestamp.
pub fn now_iso8601() -> String {
    let now = OffsetDateTime::now_utc();
    now.format(&Rfc3339)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_rfc3339() {
        let now = now_iso8601();
        assert!(OffsetDateTime::parse(&now, &Rfc3339).is_ok(), "{}", now);
        assert!(now.ends_with('Z'), "{}", now);
    }
}
