//! Result-set serialization for the download/export collaborator.
//!
//! The delimited-text column contract (`vizType, trial, groundTruth,
//! response, responseTimeMs`) is consumed by downstream analysis scripts
//! and must not drift.

use grapex_core::ResponseRecord;

pub const CSV_HEADER: &str = "vizType,trial,groundTruth,response,responseTimeMs";

/// Header plus one row per record, in completion order. Fields are
/// numeric or fixed snake_case tags, so no quoting is required.
pub fn csv_string(records: &[ResponseRecord]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 32);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            r.encoding, r.trial, r.ground_truth, r.response, r.response_time_ms
        ));
    }
    out
}

pub fn json_string(records: &[ResponseRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grapex_core::EncodingType;

    fn record() -> ResponseRecord {
        ResponseRecord {
            encoding: EncodingType::PieAngle,
            trial: 3,
            ground_truth: 43,
            response: 55.0,
            response_time_ms: 2210,
        }
    }

    #[test]
    fn csv_rows_follow_the_column_contract() {
        let csv = csv_string(&[record()]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.next(), Some("pie_angle,3,43,55,2210"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_keeps_fractional_responses() {
        let mut r = record();
        r.response = 37.5;
        let csv = csv_string(&[r]);
        assert!(csv.contains("pie_angle,3,43,37.5,2210"));
    }

    #[test]
    fn json_uses_contract_field_names() {
        let json = json_string(&[record()]).unwrap();
        for key in ["vizType", "trial", "groundTruth", "response", "responseTimeMs"] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(json.contains("pie_angle"));
    }
}
