mod csv;
mod json;
mod text;

use chrono::Utc;

use crate::pipeline::LatencyReport;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

pub trait Formatter: Send {
    fn format(&self, report: &LatencyReport) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, verbose: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(verbose)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

fn format_optional(value: Option<f64>, precision: usize, missing: &str) -> String {
    value.map_or(missing.to_string(), |v| format!("{:.*}", precision, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn sample_report() -> LatencyReport {
        LatencyReport {
            true_delay_secs: 0.01 / 30.0,
            true_delay_samples: 7,
            estimated_latency_secs: 0.00035,
            estimated_lag_samples: 7,
            lag_error_samples: 0,
            velocity_estimate: Some(28.571),
            peak_lag_samples: Some(7),
            channel_pnr_db: Some(21.5),
            beamformed_pnr_db: None,
            beamform_delays: vec![0.0, 0.01 / 30.0],
        }
    }

    #[test]
    fn test_format_optional() {
        assert_eq!(format_optional(Some(1.23456), 2, "-"), "1.23");
        assert_eq!(format_optional(None, 2, "-"), "-");
    }

    #[test]
    fn test_create_formatter_headers() {
        assert!(create_formatter(OutputFormat::Csv, false).header().is_some());
        assert!(create_formatter(OutputFormat::Json, false).header().is_none());
        assert!(create_formatter(OutputFormat::Text, true).header().is_none());
    }
}
