//! Export formatter
//!
//! Pure serialization: everything here returns text and performs no I/O.

pub mod csv;
pub mod report;

pub use self::csv::{edges_to_csv, posts_to_csv, weight_cell};
pub use report::{summary_report, ReportOptions};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Downloadable artefacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportKind {
    Posts,
    Edges,
    Report,
}

impl ExportKind {
    fn stem(&self) -> &'static str {
        match self {
            ExportKind::Posts => "misinformation_posts",
            ExportKind::Edges => "network_edges",
            ExportKind::Report => "misinformation_summary",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportKind::Posts | ExportKind::Edges => "csv",
            ExportKind::Report => "txt",
        }
    }
}

/// Timestamped file name, e.g. `network_edges_20250201_0930.csv`
pub fn export_file_name(kind: ExportKind, now: NaiveDateTime) -> String {
    format!("{}_{}.{}", kind.stem(), now.format("%Y%m%d_%H%M"), kind.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_export_file_names() {
        let now = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(9, 30, 59).unwrap();

        assert_eq!(
            export_file_name(ExportKind::Posts, now),
            "misinformation_posts_20250201_0930.csv"
        );
        assert_eq!(export_file_name(ExportKind::Edges, now), "network_edges_20250201_0930.csv");
        assert_eq!(
            export_file_name(ExportKind::Report, now),
            "misinformation_summary_20250201_0930.txt"
        );
    }
}
