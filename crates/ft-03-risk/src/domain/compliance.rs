//! AML status and compliance reports.

use ft_02_settlement::TransferRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// AML/KYC screening result for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmlStatus {
    pub account: String,
    pub aml_status: String,
    pub kyc_status: String,
}

impl AmlStatus {
    /// Every account screens clear until a real screening provider is wired in.
    pub fn clear(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            aml_status: "clear".to_string(),
            kyc_status: "verified".to_string(),
        }
    }
}

/// Renders the plain-text AML report for a settled transfer.
pub fn render_report(record: &TransferRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "AML Compliance Report");
    let _ = writeln!(out, "=====================");
    let _ = writeln!(out, "Transaction ID: {}", record.tx_id);
    let _ = writeln!(out);
    let _ = writeln!(out, "Transaction Details:");
    let _ = writeln!(out, "  Sender:    {}", record.sender);
    let _ = writeln!(out, "  Receiver:  {}", record.receiver);
    let _ = writeln!(out, "  Amount:    {}", record.amount);
    let _ = writeln!(out, "  Timestamp: {}", record.timestamp.to_rfc3339());
    let _ = writeln!(out);
    let _ = writeln!(out, "AML Check:");
    let _ = writeln!(out, "  No risks detected.");
    out
}

/// Generated reports, keyed by file name (`report_<tx_id>.txt`).
#[derive(Debug, Default)]
pub struct ReportArchive {
    reports: BTreeMap<String, String>,
}

impl ReportArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_name(tx_id: &str) -> String {
        format!("report_{}.txt", tx_id)
    }

    /// Returns the cached report for `record`, rendering it on first use.
    ///
    /// The flag is true when the report was generated by this call.
    pub fn get_or_render(&mut self, record: &TransferRecord) -> (String, bool) {
        let name = Self::file_name(&record.tx_id);
        if let Some(report) = self.reports.get(&name) {
            return (report.clone(), false);
        }
        let report = render_report(record);
        self.reports.insert(name, report.clone());
        (report, true)
    }

    /// Report file names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.reports.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record(tx_id: &str) -> TransferRecord {
        TransferRecord {
            id: 1,
            tx_id: tx_id.into(),
            sender: "BankA".into(),
            receiver: "BankB".into(),
            amount: dec!(1250.75),
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_report_contents() {
        let report = render_report(&record("abc"));
        assert!(report.starts_with("AML Compliance Report\n"));
        assert!(report.contains("Transaction ID: abc"));
        assert!(report.contains("Amount:    1250.75"));
        assert!(report.contains("2025-03-01T12:00:00+00:00"));
    }

    #[test]
    fn test_reports_are_cached() {
        let mut archive = ReportArchive::new();
        let (first, generated) = archive.get_or_render(&record("abc"));
        assert!(generated);
        let (second, generated) = archive.get_or_render(&record("abc"));
        assert!(!generated);
        assert_eq!(first, second);
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut archive = ReportArchive::new();
        archive.get_or_render(&record("zzz"));
        archive.get_or_render(&record("aaa"));
        assert_eq!(archive.names(), vec!["report_aaa.txt", "report_zzz.txt"]);
    }

    #[test]
    fn test_aml_status_is_clear() {
        let status = AmlStatus::clear("BankA");
        assert_eq!(
            serde_json::to_value(status).unwrap(),
            serde_json::json!({"account": "BankA", "aml_status": "clear", "kyc_status": "verified"})
        );
    }
}
