//! Atualização de status na planilha de origem
//!
//! Duas colunas recebem valores literais (RAW): o texto de status e a data
//! de hoje. Na estratégia `Span` cada coluna recebe uma única escrita
//! cobrindo min..=max das posições, inclusive linhas não selecionadas
//! dentro desse intervalo.

use crate::error::{Error, Result};
use crate::source::TableSource;
use crate::types::ColumnWrite;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Como as posições viram intervalos de escrita
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WriteStrategy {
    /// Um intervalo min..=max por coluna
    #[default]
    Span,
    /// Um intervalo por sequência contígua de posições
    PerRow,
}

impl std::str::FromStr for WriteStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "span" => Ok(WriteStrategy::Span),
            "per-row" | "per_row" | "row" => Ok(WriteStrategy::PerRow),
            _ => Err(format!("Estratégia desconhecida: {}. Use span ou per-row", s)),
        }
    }
}

impl std::fmt::Display for WriteStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteStrategy::Span => write!(f, "span"),
            WriteStrategy::PerRow => write!(f, "per-row"),
        }
    }
}

/// Valores aplicados igualmente a todas as linhas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status_column: String,
    pub date_column: String,
    pub status_value: String,
    pub date: String,
}

/// Intervalos de linhas (inclusivos) a escrever
pub fn plan_ranges(positions: &[u32], strategy: WriteStrategy) -> Vec<(u32, u32)> {
    let (Some(&min), Some(&max)) = (positions.iter().min(), positions.iter().max()) else {
        return Vec::new();
    };

    match strategy {
        WriteStrategy::Span => vec![(min, max)],
        WriteStrategy::PerRow => {
            let mut sorted = positions.to_vec();
            sorted.sort_unstable();
            sorted.dedup();

            let mut runs: Vec<(u32, u32)> = Vec::new();
            for pos in sorted {
                match runs.last_mut() {
                    Some((_, end)) if *end + 1 == pos => *end = pos,
                    _ => runs.push((pos, pos)),
                }
            }
            runs
        }
    }
}

impl StatusUpdate {
    /// Escritas planejadas: primeiro a coluna de status, depois a de data
    pub fn plan(&self, positions: &[u32], strategy: WriteStrategy) -> Result<Vec<ColumnWrite>> {
        let ranges = plan_ranges(positions, strategy);
        if ranges.is_empty() {
            return Err(Error::NoMatches);
        }

        let mut writes = Vec::with_capacity(ranges.len() * 2);
        for (column, value) in [
            (&self.status_column, &self.status_value),
            (&self.date_column, &self.date),
        ] {
            for &(start, end) in &ranges {
                writes.push(ColumnWrite {
                    column: column.clone(),
                    start_line: start,
                    end_line: end,
                    values: vec![value.clone(); (end - start + 1) as usize],
                });
            }
        }
        Ok(writes)
    }

    /// Aplica as escritas na origem. Para na primeira falha, sem desfazer.
    pub async fn apply<S>(
        &self,
        source: &S,
        positions: &[u32],
        strategy: WriteStrategy,
    ) -> Result<Vec<ColumnWrite>>
    where
        S: TableSource + ?Sized,
    {
        let writes = self.plan(positions, strategy)?;
        for write in &writes {
            debug!(
                column = %write.column,
                start = write.start_line,
                end = write.end_line,
                "updating column range"
            );
            source
                .update_column(&write.column, write.start_line, write.end_line, &write.values)
                .await?;
        }
        info!(writes = writes.len(), strategy = %strategy, "status updated");
        Ok(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryTable;

    fn update() -> StatusUpdate {
        StatusUpdate {
            status_column: "AF".into(),
            date_column: "AG".into(),
            status_value: "Analisando Amostra".into(),
            date: "25/12/2024".into(),
        }
    }

    #[test]
    fn test_span_covers_min_to_max() {
        assert_eq!(plan_ranges(&[3, 7], WriteStrategy::Span), vec![(3, 7)]);
        assert_eq!(plan_ranges(&[7, 3, 5], WriteStrategy::Span), vec![(3, 7)]);
        assert_eq!(plan_ranges(&[4], WriteStrategy::Span), vec![(4, 4)]);
    }

    #[test]
    fn test_per_row_groups_contiguous_runs() {
        assert_eq!(
            plan_ranges(&[3, 4, 5, 9, 11, 12], WriteStrategy::PerRow),
            vec![(3, 5), (9, 9), (11, 12)]
        );
        assert_eq!(plan_ranges(&[5, 3, 3], WriteStrategy::PerRow), vec![(3, 3), (5, 5)]);
    }

    #[test]
    fn test_empty_positions() {
        assert!(plan_ranges(&[], WriteStrategy::Span).is_empty());
        assert!(matches!(update().plan(&[], WriteStrategy::Span), Err(Error::NoMatches)));
    }

    #[test]
    fn test_span_plan_fills_whole_range() {
        let writes = update().plan(&[3, 7], WriteStrategy::Span).unwrap();
        assert_eq!(writes.len(), 2);

        assert_eq!(writes[0].column, "AF");
        assert_eq!((writes[0].start_line, writes[0].end_line), (3, 7));
        assert_eq!(writes[0].values, vec!["Analisando Amostra".to_string(); 5]);

        assert_eq!(writes[1].column, "AG");
        assert_eq!((writes[1].start_line, writes[1].end_line), (3, 7));
        assert_eq!(writes[1].values, vec!["25/12/2024".to_string(); 5]);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("span".parse::<WriteStrategy>().unwrap(), WriteStrategy::Span);
        assert_eq!("Per-Row".parse::<WriteStrategy>().unwrap(), WriteStrategy::PerRow);
        assert!("outra".parse::<WriteStrategy>().is_err());
        assert_eq!(WriteStrategy::PerRow.to_string(), "per-row");
    }

    #[tokio::test]
    async fn test_apply_span_touches_unmatched_rows() {
        let rows: Vec<Vec<String>> = (1..=8).map(|i| vec![format!("S{}", i)]).collect();
        let table = MemoryTable::new("Geral", rows);

        update().apply(&table, &[3, 7], WriteStrategy::Span).await.unwrap();

        let snapshot = table.rows();
        for line in 3..=7 {
            let row = &snapshot[line - 1];
            assert_eq!(row[31], "Analisando Amostra", "linha {}", line);
            assert_eq!(row[32], "25/12/2024", "linha {}", line);
        }
        assert!(snapshot[1].len() <= 31);
        assert!(snapshot[7].len() <= 31);
    }

    #[tokio::test]
    async fn test_apply_per_row_skips_gaps() {
        let rows: Vec<Vec<String>> = (1..=8).map(|i| vec![format!("S{}", i)]).collect();
        let table = MemoryTable::new("Geral", rows);

        let writes = update().apply(&table, &[3, 7], WriteStrategy::PerRow).await.unwrap();
        assert_eq!(writes.len(), 4);

        let snapshot = table.rows();
        assert_eq!(snapshot[2][31], "Analisando Amostra");
        assert_eq!(snapshot[6][32], "25/12/2024");
        assert!(snapshot[4].len() <= 31);
    }

    #[tokio::test]
    async fn test_apply_stops_on_first_failure() {
        let table = MemoryTable::new("Geral", vec![vec!["ID".into()], vec!["S1".into()]])
            .fail_writes_after(1);

        let err = update().apply(&table, &[2], WriteStrategy::Span).await.unwrap_err();
        assert!(matches!(err, Error::RemoteWrite(_)));
        assert_eq!(table.writes().len(), 1);
    }
}
