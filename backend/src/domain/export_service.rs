//! Export service domain logic.
//!
//! Renders stored responses as the downloadable CSV document. The output
//! does not depend on which backend produced the rows: a UTF-8 byte-order
//! mark, the canonical header, then one row per response in the order given.

use std::io;

use crate::domain::models::response::{SurveyField, SurveyResponse};
use crate::storage::csv::{writer_builder, UTF8_BOM};

/// Filename offered in the download's Content-Disposition header
pub const EXPORT_FILENAME: &str = "responses.csv";

#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    pub fn render_csv(&self, responses: &[SurveyResponse]) -> csv::Result<String> {
        let mut buffer = Vec::new();
        buffer.extend_from_slice(UTF8_BOM.as_bytes());

        let mut csv_writer = writer_builder().from_writer(buffer);
        csv_writer.write_record(SurveyField::header_labels())?;
        for response in responses {
            csv_writer.write_record(response.values())?;
        }

        let buffer = csv_writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        String::from_utf8(buffer)
            .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Content-Disposition header value for the export download
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", EXPORT_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(name: &str, comment: &str) -> SurveyResponse {
        SurveyResponse {
            submitted_at: "2024-05-01 10:00:00".to_string(),
            name: name.to_string(),
            phone: "03-1234-5678".to_string(),
            email: "a@b.com".to_string(),
            company: "Acme".to_string(),
            position: "CEO".to_string(),
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_empty_export_is_bom_and_header() {
        let csv = ExportService::new().render_csv(&[]).unwrap();
        assert_eq!(
            csv,
            "\u{feff}受付日時,氏名,電話番号,メールアドレス,会社名,役職,セミナー感想\r\n"
        );
    }

    #[test]
    fn test_rows_are_byte_exact() {
        let responses = vec![response("田中太郎", ""), response("Smith, John", "say \"hi\"")];
        let csv = ExportService::new().render_csv(&responses).unwrap();

        let expected = concat!(
            "\u{feff}受付日時,氏名,電話番号,メールアドレス,会社名,役職,セミナー感想\r\n",
            "2024-05-01 10:00:00,田中太郎,03-1234-5678,a@b.com,Acme,CEO,\r\n",
            "2024-05-01 10:00:00,\"Smith, John\",03-1234-5678,a@b.com,Acme,CEO,\"say \"\"hi\"\"\"\r\n",
        );
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_rows_keep_given_order() {
        let responses = vec![response("B", ""), response("A", "")];
        let csv = ExportService::new().render_csv(&responses).unwrap();

        let b = csv.find(",B,").unwrap();
        let a = csv.find(",A,").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            ExportService::new().content_disposition(),
            "attachment; filename=responses.csv"
        );
    }
}
