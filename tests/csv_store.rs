#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use spent::libs::csv::{CsvStore, StoreError};
    use std::fs;
    use tempfile::TempDir;

    fn store(temp_dir: &TempDir) -> CsvStore {
        CsvStore::with_path(temp_dir.path().join("expenses.csv"))
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_first_append_creates_file_with_header() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        let id = store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();

        assert_eq!(id, 1);
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "ID,Date,Description,Amount\n1,2024-12-19,Lunch,20\n");
    }

    #[test]
    fn test_ids_increase_from_one() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        let first = store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();
        let second = store.append(date("2024-12-20"), "Dinner", dec!(10)).unwrap();
        let third = store.append(date("2024-12-21"), "Coffee", dec!(3.5)).unwrap();

        assert_eq!((first, second, third), (1, 2, 3));
    }

    #[test]
    fn test_round_trip_preserves_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();

        let rows = store.rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["1", "2024-12-19", "Lunch", "20"]);
    }

    #[test]
    fn test_rows_of_missing_file_is_a_typed_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        assert!(matches!(store.rows(), Err(StoreError::Missing)));
    }

    #[test]
    fn test_delete_present_keeps_other_rows_in_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();
        store.append(date("2024-12-20"), "Dinner", dec!(10)).unwrap();
        store.append(date("2024-12-21"), "Coffee", dec!(3.5)).unwrap();

        let removed = store.delete(2).unwrap();

        assert!(removed);
        let rows = store.rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["1", "2024-12-19", "Lunch", "20"]);
        assert_eq!(rows[2], vec!["3", "2024-12-21", "Coffee", "3.5"]);
    }

    #[test]
    fn test_delete_absent_leaves_file_byte_for_byte_unchanged() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();
        let before = fs::read(store.path()).unwrap();

        let removed = store.delete(99).unwrap();

        assert!(!removed);
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_deleting_the_highest_id_allows_reuse() {
        // next id is always max + 1, so the highest id comes back after a
        // delete; accepted behavior for a single-user ledger
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();
        store.append(date("2024-12-20"), "Dinner", dec!(10)).unwrap();

        store.delete(2).unwrap();
        let id = store.append(date("2024-12-21"), "Coffee", dec!(3.5)).unwrap();

        assert_eq!(id, 2);
    }

    #[test]
    fn test_summarize_missing_file_is_zero() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        assert_eq!(store.summarize(None).unwrap(), dec!(0));
        assert_eq!(store.summarize(Some(8)).unwrap(), dec!(0));
    }

    #[test]
    fn test_summarize_filters_by_month_across_years() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        store.append(date("2024-12-02"), "Argentina car tickets", dec!(837)).unwrap();
        store.append(date("2023-12-10"), "Coffee", dec!(3)).unwrap();
        store.append(date("2024-11-05"), "Lunch", dec!(20)).unwrap();

        assert_eq!(store.summarize(None).unwrap(), dec!(860));
        assert_eq!(store.summarize(Some(12)).unwrap(), dec!(840));
        assert_eq!(store.summarize(Some(1)).unwrap(), dec!(0));
    }

    #[test]
    fn test_trailing_blank_lines_are_tolerated() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        fs::write(
            store.path(),
            "ID,Date,Description,Amount\n1,2024-12-19,Lunch,20\n\n",
        )
        .unwrap();

        assert_eq!(store.rows().unwrap().len(), 2);
        let id = store.append(date("2024-12-20"), "Dinner", dec!(10)).unwrap();
        assert_eq!(id, 2);
    }

    #[test]
    fn test_malformed_row_is_rejected_with_its_line_number() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        fs::write(
            store.path(),
            "ID,Date,Description,Amount\n1,2024-12-19,Lunch,20\n2,2024-12-20,Dinner\n",
        )
        .unwrap();

        match store.rows() {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected corruption error, got {:?}", other.map(|rows| rows.len())),
        }
    }

    #[test]
    fn test_list_formatted_sorts_by_date_and_aligns_columns() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);
        store.append(date("2024-12-19"), "Lunch", dec!(20)).unwrap();
        store.append(date("2024-12-02"), "Argentina car tickets", dec!(837)).unwrap();

        let lines = store.list_formatted().unwrap();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "ID    Date          Description              Amount ");
        assert_eq!(lines[1], "2     2024-12-02    Argentina car tickets    $837    ");
        assert_eq!(lines[2], "1     2024-12-19    Lunch                    $20     ");
    }

    #[test]
    fn test_list_formatted_of_missing_file_is_a_typed_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = store(&temp_dir);

        assert!(matches!(store.list_formatted(), Err(StoreError::Missing)));
    }
}
