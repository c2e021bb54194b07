//! Geração do Excel (biblioteca comum)
//!
//! Uma única aba: cabeçalho em negrito e as linhas selecionadas. Todas as
//! células são gravadas como texto, para que códigos como `00123` não
//! virem números.

use crate::error::{Error, Result};
use crate::types::TableRow;
use rust_xlsxwriter::*;

fn col_num(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| Error::Export(format!("coluna fora do limite: {}", index)))
}

/// Gera o Excel em memória
///
/// # Arguments
/// * `header` - nomes das colunas (define largura e ordem)
/// * `rows` - linhas já completadas até a largura do cabeçalho
/// * `sheet_name` - nome da aba
pub fn build_workbook_buffer<'a, I>(header: &[String], rows: I, sheet_name: &str) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a TableRow>,
{
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, name) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, col_num(col)?, name, &header_format)?;
    }

    let mut row_num: u32 = 1;
    for row in rows {
        // colunas além do cabeçalho não são exportadas
        for (col, value) in row.iter().take(header.len()).enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet.write_string(row_num, col_num(col)?, value)?;
        }
        row_num += 1;
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, Reader, Xlsx};
    use std::io::Cursor;

    fn read_back(bytes: Vec<u8>, sheet: &str) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        range
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_and_rows() {
        let header = vec!["ID".to_string(), "Name".to_string()];
        let rows = vec![vec!["S2".to_string(), "Bob".to_string()]];

        let bytes = build_workbook_buffer(&header, &rows, "Amostras").unwrap();
        let read = read_back(bytes, "Amostras");

        assert_eq!(read, vec![vec!["ID", "Name"], vec!["S2", "Bob"]]);
    }

    #[test]
    fn test_numeric_looking_codes_stay_text() {
        let header = vec!["Amostra".to_string()];
        let rows = vec![vec!["00123".to_string()]];

        let bytes = build_workbook_buffer(&header, &rows, "Amostras").unwrap();
        let read = read_back(bytes, "Amostras");

        assert_eq!(read[1][0], "00123");
    }

    #[test]
    fn test_blank_cells_keep_width() {
        let header = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let rows = vec![vec!["x".to_string(), String::new(), "z".to_string()]];

        let bytes = build_workbook_buffer(&header, &rows, "Amostras").unwrap();
        let read = read_back(bytes, "Amostras");

        assert_eq!(read[1], vec!["x", "", "z"]);
    }

    #[test]
    fn test_invalid_sheet_name() {
        let header = vec!["ID".to_string()];
        let rows: Vec<TableRow> = Vec::new();
        let result = build_workbook_buffer(&header, &rows, "a/b");
        assert!(matches!(result, Err(Error::Export(_))));
    }
}
