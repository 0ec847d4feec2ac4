use crate::domain::model::Reservation;
use crate::utils::error::{LedgerError, Result};

/// 將預約表輸出為 CSV，欄位為 number,name,phone，保持建立順序
pub fn reservations_to_csv(reservations: &[Reservation]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if reservations.is_empty() {
        writer.write_record(["number", "name", "phone"])?;
    }
    for reservation in reservations {
        writer.serialize(reservation)?;
    }
    writer
        .into_inner()
        .map_err(|e| LedgerError::IoError(e.into_error()))
}

/// 將 CSV 寫到使用者指定的路徑，失敗時回報該路徑而非帳本檔
pub async fn write_csv_file(path: &str, reservations: &[Reservation]) -> Result<()> {
    let data = reservations_to_csv(reservations)?;
    tokio::fs::write(path, data)
        .await
        .map_err(|source| LedgerError::ExportError {
            path: path.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SlotId;

    #[test]
    fn test_csv_has_header_and_rows_in_order() {
        let reservations = vec![
            Reservation {
                slot: SlotId::parse("50").unwrap(),
                name: "Ana García".to_string(),
                phone: "555-0100".to_string(),
            },
            Reservation {
                slot: SlotId::parse("03").unwrap(),
                name: "Pérez, Luis".to_string(),
                phone: "555-0101".to_string(),
            },
        ];

        let csv = String::from_utf8(reservations_to_csv(&reservations).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "number,name,phone");
        assert_eq!(lines[1], "50,Ana García,555-0100");
        assert_eq!(lines[2], "03,\"Pérez, Luis\",555-0101");
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_is_export_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.csv");
        let path = path.to_str().unwrap();

        let err = tokio_test::assert_err!(write_csv_file(path, &[]).await);
        match err {
            LedgerError::ExportError { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected export error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_write_csv_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let path = path.to_str().unwrap();

        write_csv_file(path, &[]).await.unwrap();
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(written.trim_end(), "number,name,phone");
    }

    #[test]
    fn test_empty_export_still_has_header() {
        let csv = String::from_utf8(reservations_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv.trim_end(), "number,name,phone");
    }
}
