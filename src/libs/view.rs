//! Column-aligned rendering of ledger rows.
//!
//! Both backends present expenses through the same fixed table shape:
//!
//! ```text
//! ID    Date          Description      Amount
//! 1     2024-12-19    description      $100
//! 2     2024-12-19    description 2    $200
//! ```

/// Renders rows (header first) into aligned display lines.
///
/// Column widths are the per-column maxima over all rows, header included.
/// Every column except the last is padded to width + 3; the amount column is
/// prefixed with `$` on data rows and padded only to its own width. Each cell
/// is followed by a single space. Row order is preserved — callers sort
/// before rendering.
pub fn align_rows(rows: &[Vec<String>]) -> Vec<String> {
    let mut widths: Vec<usize> = Vec::new();
    for row in rows {
        for (index, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            if index == widths.len() {
                widths.push(len);
            } else if len > widths[index] {
                widths[index] = len;
            }
        }
    }

    rows.iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut line = String::new();
            for (index, cell) in row.iter().enumerate() {
                let is_amount = index + 1 == row.len();
                let padding = if is_amount { 0 } else { 3 };
                if is_amount && row_index != 0 {
                    line.push('$');
                }
                line.push_str(cell);
                let fill = widths[index] + padding - cell.chars().count();
                line.extend(std::iter::repeat(' ').take(fill));
                line.push(' ');
            }
            line
        })
        .collect()
}
