use serde::Serialize;

use super::{Formatter, iso8601_timestamp};
use crate::pipeline::LatencyReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonRow<'a> {
    ts: String,
    #[serde(flatten)]
    report: &'a LatencyReport,
    beamform_gain_db: Option<f64>,
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &LatencyReport) -> String {
        let row = JsonRow {
            ts: iso8601_timestamp(),
            report,
            beamform_gain_db: report.beamform_gain_db(),
        };
        serde_json::to_string(&row).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
