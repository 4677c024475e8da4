//! CSV export of a campaign's recipient breakdown.

use mailcast_api_models::RecipientRecord;

const HEADER: &str = "Name,Email,Application ID,Status,Sent At,Error";

/// Render recipient records as CSV with a fixed header row.
///
/// Null `sentAt`/`error` become empty cells. Fields containing commas,
/// quotes, or newlines are quoted with doubled inner quotes.
#[must_use]
pub fn recipients_csv(recipients: &[RecipientRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for recipient in recipients {
        let sent_at = recipient
            .sent_at
            .map(|timestamp| timestamp.to_rfc3339())
            .unwrap_or_default();
        let row = [
            recipient.name.as_str(),
            recipient.email.as_str(),
            recipient.application_id.as_str(),
            recipient.status.as_str(),
            sent_at.as_str(),
            recipient.error.as_deref().unwrap_or_default(),
        ];
        let encoded: Vec<String> = row.iter().map(|field| escape(field)).collect();
        out.push_str(&encoded.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mailcast_api_models::RecipientStatus;

    fn record(name: &str, status: RecipientStatus, error: Option<&str>) -> RecipientRecord {
        RecipientRecord {
            application_id: "A1".into(),
            name: name.into(),
            email: "a@example.com".into(),
            status,
            sent_at: None,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn empty_export_is_header_only() {
        assert_eq!(
            recipients_csv(&[]),
            "Name,Email,Application ID,Status,Sent At,Error\n"
        );
    }

    #[test]
    fn rows_follow_header_order() {
        let sent = Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).single().unwrap();
        let mut record = record("Jo Doe", RecipientStatus::Sent, None);
        record.sent_at = Some(sent);

        let csv = recipients_csv(&[record]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Email,Application ID,Status,Sent At,Error")
        );
        assert_eq!(
            lines.next(),
            Some("Jo Doe,a@example.com,A1,sent,2026-08-01T12:00:00+00:00,")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let failed = record(
            "Doe, Jo \"JD\"",
            RecipientStatus::Failed,
            Some("mailbox full, retry later"),
        );
        let csv = recipients_csv(&[failed]);
        assert!(csv.contains("\"Doe, Jo \"\"JD\"\"\""));
        assert!(csv.contains("\"mailbox full, retry later\""));
    }
}
