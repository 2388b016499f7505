use super::{Formatter, format_optional};
use crate::pipeline::LatencyReport;

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &LatencyReport) -> String {
        let latency_ms = report.estimated_latency_secs * 1000.0;
        let velocity = format_optional(report.velocity_estimate, 2, "-");
        if self.verbose {
            format!(
                "Latency: {:.3} ms ({} samples) true: {:.3} ms ({} samples) error: {:+} samples velocity: {} m/s [peak lag: {}, PNR: {} dB -> {} dB, gain: {} dB]",
                latency_ms,
                report.estimated_lag_samples,
                report.true_delay_secs * 1000.0,
                report.true_delay_samples,
                report.lag_error_samples,
                velocity,
                report
                    .peak_lag_samples
                    .map_or("-".to_string(), |p| p.to_string()),
                format_optional(report.channel_pnr_db, 1, "-"),
                format_optional(report.beamformed_pnr_db, 1, "-"),
                format_optional(report.beamform_gain_db(), 1, "-"),
            )
        } else {
            format!(
                "Estimated latency: {:.3} ms velocity: {} m/s",
                latency_ms, velocity
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_report;

    #[test]
    fn test_text_summary() {
        let line = TextFormatter::new(false).format(&sample_report());
        assert_eq!(line, "Estimated latency: 0.350 ms velocity: 28.57 m/s");
    }

    #[test]
    fn test_text_verbose_marks_missing_values() {
        let line = TextFormatter::new(true).format(&sample_report());
        assert!(line.contains("error: +0 samples"), "{}", line);
        assert!(line.contains("PNR: 21.5 dB -> - dB"), "{}", line);
        assert!(line.contains("gain: - dB"), "{}", line);
    }
}
