//! Conversão entre letras de coluna e índices
//!
//! Segue a nomenclatura das planilhas: base 26 com dígitos 'A'=1..'Z'=26,
//! então "A" → 0, "Z" → 25, "AA" → 26.

use crate::error::{Error, Result};

/// Converte letras de coluna em índice 0-based
pub fn column_to_index(letters: &str) -> Result<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return Err(Error::Config("coluna vazia".into()));
    }

    let mut col: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(Error::Config(format!("coluna inválida: {}", letters)));
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(digit))
            .ok_or_else(|| Error::Config(format!("coluna fora do limite: {}", letters)))?;
    }
    Ok(col - 1)
}

/// Converte índice 0-based em letras de coluna
pub fn index_to_column(index: usize) -> String {
    let mut out = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Normaliza letras de coluna para maiúsculas, validando
pub fn normalize_column(letters: &str) -> Result<String> {
    column_to_index(letters).map(index_to_column)
}

/// Nome da aba em notação A1, entre aspas quando necessário
pub fn quote_sheet_name(sheet: &str) -> String {
    let plain = !sheet.is_empty() && sheet.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        sheet.to_string()
    } else {
        format!("'{}'", sheet.replace('\'', "''"))
    }
}

/// Intervalo A1: a aba inteira, ou `coluna início:fim` dentro dela
pub fn a1_range(sheet: &str, cells: Option<(&str, u32, u32)>) -> String {
    let sheet = quote_sheet_name(sheet);
    match cells {
        None => sheet,
        Some((column, start, end)) => format!("{}!{}{}:{}{}", sheet, column, start, column, end),
    }
}
