//! Indicador de ocupado por etapa

use indicatif::{ProgressBar, ProgressStyle};
use sample_select_common::Phase;
use std::time::Duration;

const TOTAL_STEPS: usize = 3;

#[derive(Default)]
pub struct PhaseSpinner {
    bar: Option<ProgressBar>,
}

impl PhaseSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conclui a etapa anterior e começa a próxima
    pub fn phase(&mut self, phase: Phase) {
        self.finish();
        let bar = ProgressBar::new_spinner();
        bar.set_style(ProgressStyle::default_spinner());
        bar.set_message(format!("[{}/{}] {}", phase.step(), TOTAL_STEPS, phase.label()));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    pub fn finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
    }

    /// Em caso de erro a linha fica como estava
    pub fn abandon(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.abandon();
        }
    }
}
