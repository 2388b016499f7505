use super::{Formatter, format_optional, iso8601_timestamp};
use crate::pipeline::LatencyReport;

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, report: &LatencyReport) -> String {
        format!(
            "{},{:.6},{},{:.6},{},{},{},{},{},{}",
            iso8601_timestamp(),
            report.true_delay_secs,
            report.true_delay_samples,
            report.estimated_latency_secs,
            report.estimated_lag_samples,
            report.lag_error_samples,
            format_optional(report.velocity_estimate, 3, ""),
            report
                .peak_lag_samples
                .map_or(String::new(), |p| p.to_string()),
            format_optional(report.channel_pnr_db, 2, ""),
            format_optional(report.beamformed_pnr_db, 2, ""),
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,true_delay_s,true_delay_samples,latency_s,lag_samples,lag_error_samples,velocity_m_s,peak_lag_samples,channel_pnr_db,beamformed_pnr_db",
        )
    }
}
