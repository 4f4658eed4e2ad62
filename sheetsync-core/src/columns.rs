//! Column letters and A1 range strings.
//!
//! Letters use bijective base 26: `A`..`Z`, then `AA`..`ZZ`, then `AAA`.

use crate::error::CoreError;
use crate::types::SheetName;

/// Letters for the `count`-th column (1-based): `1 -> A`, `27 -> AA`.
pub fn column_letter(count: usize) -> Result<String, CoreError> {
    if count == 0 {
        return Err(CoreError::ZeroColumn);
    }
    let mut n = count;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    Ok(letters.into_iter().rev().collect())
}

/// Zero-based column index for `letters`: `A -> 0`, `AA -> 26`.
///
/// Case-insensitive.
pub fn column_index(letters: &str) -> Result<usize, CoreError> {
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::InvalidColumnLetters(letters.to_string()));
    }
    let mut index: usize = 0;
    for c in letters.chars() {
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| CoreError::InvalidColumnLetters(letters.to_string()))?;
    }
    Ok(index - 1)
}

/// `'<sheet>'!1:1`: the whole header row.
pub fn header_row_range(sheet: &SheetName) -> String {
    format!("{}!1:1", sheet.a1_prefix())
}

/// `'<sheet>'!A:<last>`: the append target for `width` columns.
pub fn append_range(sheet: &SheetName, width: usize) -> Result<String, CoreError> {
    Ok(format!("{}!A:{}", sheet.a1_prefix(), column_letter(width)?))
}

/// `'<sheet>'!A1:<last>`: header row plus every data row for `width` columns.
pub fn table_range(sheet: &SheetName, width: usize) -> Result<String, CoreError> {
    Ok(format!("{}!A1:{}", sheet.a1_prefix(), column_letter(width)?))
}
