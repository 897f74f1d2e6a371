//! Spreadsheet-style column names used as option keys.

use crate::error::{Result, SortableError};

/// Convert a 0-based column index to column letters
/// 0=A, 1=B, ... 25=Z, 26=AA, 27=AB, ...
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut col = index;
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters (case-insensitive) to a 0-based column index
pub fn column_index(letters: &str) -> Result<usize> {
    let trimmed = letters.trim();
    if trimmed.is_empty() {
        return Err(SortableError::InvalidColumnName(letters.to_string()));
    }

    let mut col: usize = 0;
    for b in trimmed.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(SortableError::InvalidColumnName(letters.to_string()));
        }
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add((b.to_ascii_uppercase() - b'A') as usize + 1))
            .ok_or_else(|| SortableError::InvalidColumnName(letters.to_string()))?;
    }

    Ok(col - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letters(0), "A");
        assert_eq!(column_letters(25), "Z");
        assert_eq!(column_letters(26), "AA");
        assert_eq!(column_letters(27), "AB");
        assert_eq!(column_letters(701), "ZZ");
        assert_eq!(column_letters(702), "AAA");
    }

    #[test]
    fn test_column_letters_at_usize_limit() {
        let letters = column_letters(usize::MAX);
        assert!(letters.bytes().all(|b| b.is_ascii_uppercase()));
        let below = column_letters(usize::MAX - 1);
        assert_eq!(column_index(&below).unwrap(), usize::MAX - 1);
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A").unwrap(), 0);
        assert_eq!(column_index("z").unwrap(), 25);
        assert_eq!(column_index("AA").unwrap(), 26);
        assert_eq!(column_index("aaa").unwrap(), 702);
    }

    #[test]
    fn test_inverse() {
        for i in [0, 1, 25, 26, 51, 52, 675, 676, 701, 702, 18_277] {
            assert_eq!(column_index(&column_letters(i)).unwrap(), i);
        }
    }

    #[test]
    fn test_invalid_names() {
        assert!(column_index("").is_err());
        assert!(column_index("A1").is_err());
        assert!(column_index("-").is_err());
    }
}
