//! Origem da tabela (planilha remota)
//!
//! `SheetsClient` implementa a origem real; `MemoryTable` mantém a tabela
//! em memória e registra as escritas (testes e modo offline).

use crate::column::column_to_index;
use crate::error::{Error, Result};
use crate::types::{ColumnWrite, TableRow};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[async_trait]
pub trait TableSource: Send + Sync {
    /// Nome da aba, para mensagens
    fn name(&self) -> &str;

    /// Todas as linhas como texto formatado; a primeira é o cabeçalho
    async fn fetch(&self) -> Result<Vec<TableRow>>;

    /// Escreve valores literais em `column`, linhas `start_line..=end_line`
    async fn update_column(
        &self,
        column: &str,
        start_line: u32,
        end_line: u32,
        values: &[String],
    ) -> Result<()>;
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: Vec<TableRow>,
    writes: Vec<ColumnWrite>,
    fetches: usize,
}

/// Tabela em memória
#[derive(Debug)]
pub struct MemoryTable {
    name: String,
    state: Mutex<MemoryState>,
    fail_writes_after: Option<usize>,
}

impl MemoryTable {
    pub fn new(name: impl Into<String>, rows: Vec<TableRow>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(MemoryState { rows, ..Default::default() }),
            fail_writes_after: None,
        }
    }

    /// Faz as escritas falharem depois de `n` escritas bem-sucedidas
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.fail_writes_after = Some(n);
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.lock().rows.clone()
    }

    pub fn writes(&self) -> Vec<ColumnWrite> {
        self.lock().writes.clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.lock().fetches
    }
}

#[async_trait]
impl TableSource for MemoryTable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<TableRow>> {
        let mut state = self.lock();
        state.fetches += 1;
        Ok(state.rows.clone())
    }

    async fn update_column(
        &self,
        column: &str,
        start_line: u32,
        end_line: u32,
        values: &[String],
    ) -> Result<()> {
        let col = column_to_index(column)?;
        if start_line == 0 || end_line < start_line {
            return Err(Error::RemoteWrite(format!(
                "intervalo inválido: {}{}:{}{}",
                column, start_line, column, end_line
            )));
        }

        let mut state = self.lock();
        if let Some(limit) = self.fail_writes_after {
            if state.writes.len() >= limit {
                return Err(Error::RemoteWrite(format!("escrita recusada em {}", column)));
            }
        }

        for (line, value) in (start_line..=end_line).zip(values) {
            let idx = (line - 1) as usize;
            if state.rows.len() <= idx {
                state.rows.resize(idx + 1, Vec::new());
            }
            let row = &mut state.rows[idx];
            if row.len() <= col {
                row.resize(col + 1, String::new());
            }
            row[col] = value.clone();
        }

        state.writes.push(ColumnWrite {
            column: column.to_string(),
            start_line,
            end_line,
            values: values.to_vec(),
        });
        Ok(())
    }
}
