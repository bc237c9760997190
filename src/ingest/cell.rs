//! Spreadsheet coordinates for photo links.

use std::fmt;

use crate::core::config::batch::FIRST_DATA_ROW;

/// Column that receives a photo link.
///
/// Odd photos of a batch go to C, even photos to D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Column {
    C,
    D,
}

impl Column {
    /// Column for the n-th photo of a batch (1-based)
    pub fn for_position(position: u32) -> Self {
        if position % 2 == 1 {
            Column::C
        } else {
            Column::D
        }
    }

    /// A1 range covering every data row of this column (`C2:C`)
    pub fn data_range(self) -> String {
        format!("{col}{row}:{col}", col = self, row = FIRST_DATA_ROW)
    }
}

/// A single cell in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetCell {
    pub column: Column,
    pub row: u32,
}

impl TargetCell {
    /// First empty cell of `column` given how many data rows it already has.
    pub fn after_existing(column: Column, existing_rows: usize) -> Self {
        let existing = u32::try_from(existing_rows).unwrap_or(u32::MAX - FIRST_DATA_ROW);
        Self {
            column,
            row: existing.saturating_add(FIRST_DATA_ROW),
        }
    }
}

impl fmt::Display for TargetCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_parity() {
        assert_eq!(Column::for_position(1), Column::C);
        assert_eq!(Column::for_position(2), Column::D);
        assert_eq!(Column::for_position(3), Column::C);
        assert_eq!(Column::for_position(20), Column::D);
        assert_eq!(Column::for_position(21), Column::C);
    }

    #[test]
    fn test_data_range() {
        assert_eq!(Column::C.data_range(), "C2:C");
        assert_eq!(Column::D.data_range(), "D2:D");
    }

    #[test]
    fn test_empty_column_starts_below_header() {
        let cell = TargetCell::after_existing(Column::C, 0);
        assert_eq!(cell.row, 2);
        assert_eq!(cell.to_string(), "C2");
    }

    #[test]
    fn test_row_after_k_values() {
        for k in [1usize, 5, 19] {
            let cell = TargetCell::after_existing(Column::D, k);
            assert_eq!(cell.row as usize, k + 2);
        }
        assert_eq!(TargetCell::after_existing(Column::D, 7).to_string(), "D9");
    }
}
