use std::future::Future;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText};
use sample_select_common::{
    credentials_from_settings, run_export, ExportReport, Outcome, Result, RunOptions,
    SampleSelector, Session, Settings, SheetsClient, TableSource,
};
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::io::{save_artifact_to, with_xlsx_extension};
use crate::model::{drain_messages, BusyState, UiMessage};

pub struct DesktopApp {
    session: Session,
    settings: Settings,
    dry_run: bool,
    busy: BusyState,
    export_rx: Option<Receiver<UiMessage>>,
    status: String,
    focus_input: bool,
    /// Runtime da sessão, criado na primeira exportação
    runtime: Option<Runtime>,
    /// Cliente do Sheets, autenticado uma vez e reutilizado
    client: Arc<OnceCell<SheetsClient>>,
}

impl Default for DesktopApp {
    fn default() -> Self {
        let (settings, status) = match Settings::load() {
            Ok(settings) => (settings, String::new()),
            Err(err) => (Settings::default(), format!("Configuração padrão em uso: {err}")),
        };
        Self {
            session: Session::new(),
            settings,
            dry_run: false,
            busy: BusyState::default(),
            export_rx: None,
            status,
            focus_input: true,
            runtime: None,
            client: Arc::new(OnceCell::new()),
        }
    }
}

impl DesktopApp {
    fn scan(&mut self) {
        let code = self.session.pending_input.trim().to_string();
        if code.is_empty() {
            self.session.pending_input.clear();
            return;
        }
        if self.session.on_scan() {
            self.status = String::new();
        } else {
            self.status = format!("{code} já está na lista");
        }
    }

    fn start_export(&mut self) {
        let selector = match self.session.begin_export() {
            Ok(selector) => selector,
            Err(err) => {
                self.status = match self.session.last_outcome() {
                    Some(outcome) => outcome.message(),
                    None => err.to_string(),
                };
                return;
            }
        };

        let handle = match self.runtime_handle() {
            Ok(handle) => handle,
            Err(err) => {
                self.finish(Err(err));
                return;
            }
        };

        info!(samples = selector.len(), dry_run = self.dry_run, "export started");
        let (tx, rx) = mpsc::channel();
        self.export_rx = Some(rx);
        self.busy = BusyState::default();
        self.status.clear();

        let settings = self.settings.clone();
        let client = Arc::clone(&self.client);
        let options = RunOptions { dry_run: self.dry_run };
        // se a tarefa abortar, `tx` é descartado e a UI vê o canal fechado
        handle.spawn(async move {
            let result = export_with_cached_source(
                &client,
                || connect(&settings),
                &settings,
                &selector,
                options,
                &tx,
            )
            .await;
            let _ = tx.send(UiMessage::Done(result));
        });
    }

    fn runtime_handle(&mut self) -> Result<Handle> {
        let runtime = match self.runtime.take() {
            Some(runtime) => runtime,
            None => Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name("amostras-export")
                .enable_all()
                .build()?,
        };
        let handle = runtime.handle().clone();
        self.runtime = Some(runtime);
        Ok(handle)
    }

    fn poll_messages(&mut self) {
        let Some(rx) = &self.export_rx else {
            return;
        };

        if let Some(result) = drain_messages(rx, &mut self.busy) {
            self.export_rx = None;
            self.busy = BusyState::default();
            self.finish(result);
        }
    }

    fn finish(&mut self, result: Result<ExportReport>) {
        let outcome = self.session.finish_export(&result).clone();
        let report = match result {
            Ok(report) => report,
            Err(err) => {
                if !err.is_warning() {
                    error!(error = %err, "export failed");
                }
                self.status = outcome.message();
                return;
            }
        };

        let mut message = outcome.message();
        if report.dry_run {
            message.push_str(" (simulação: planilha não alterada)");
        }

        let picked = rfd::FileDialog::new()
            .add_filter("Excel", &["xlsx"])
            .set_file_name(&report.artifact.file_name)
            .save_file();
        match picked {
            Some(path) => {
                let path = with_xlsx_extension(path);
                match save_artifact_to(&path, &report.artifact) {
                    Ok(()) => message = format!("{message} Salvo em {}", path.display()),
                    Err(err) => message = format!("❌ Falha ao salvar: {err:#}"),
                }
            }
            None => message = format!("{message} Arquivo não salvo."),
        }
        self.status = message;
    }

    fn render_samples(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("Amostras selecionadas").strong());
        ui.label(format!("{} amostra(s)", self.session.selector.len()));
        ui.separator();

        if self.session.selector.is_empty() {
            ui.label(RichText::new(self.session.selector.display()).color(Color32::from_gray(150)));
            return;
        }

        let exporting = self.session.is_exporting();
        let mut remove = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height((ui.available_height() - 80.0).max(120.0))
            .show(ui, |ui| {
                for code in self.session.selector.list() {
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!exporting, egui::Button::new("✕").small()).clicked() {
                            remove = Some(code.clone());
                        }
                        ui.monospace(code);
                    });
                }
            });
        if let Some(code) = remove {
            self.session.selector.remove(&code);
        }
    }
}

async fn connect(settings: &Settings) -> Result<SheetsClient> {
    let spreadsheet_id = settings.require_spreadsheet_id()?;
    let credentials = credentials_from_settings(settings).await?;
    let client = SheetsClient::new(credentials, spreadsheet_id, settings.sheet_name.clone())?;
    info!(spreadsheet = spreadsheet_id, "google sheets client ready");
    Ok(client)
}

/// Exporta usando a origem da sessão, conectando só na primeira vez
///
/// Falha ao conectar não fica guardada; a próxima exportação tenta de novo.
async fn export_with_cached_source<S, C, Fut>(
    source: &OnceCell<S>,
    connect: C,
    settings: &Settings,
    selector: &SampleSelector,
    options: RunOptions,
    tx: &Sender<UiMessage>,
) -> Result<ExportReport>
where
    S: TableSource,
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<S>>,
{
    let today = settings.today()?;
    let source = source.get_or_try_init(connect).await?;
    run_export(source, selector, settings, &today, options, |phase| {
        let _ = tx.send(UiMessage::Phase(phase));
    })
    .await
}

fn outcome_color(outcome: Option<&Outcome>) -> Color32 {
    match outcome {
        Some(Outcome::Exported { .. }) => Color32::from_rgb(90, 180, 110),
        Some(Outcome::Warning(_)) => Color32::from_rgb(246, 196, 69),
        Some(Outcome::Failed(_)) => Color32::from_rgb(220, 90, 90),
        None => Color32::from_gray(170),
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.export_rx.is_some() {
            ctx.request_repaint();
        }
        self.poll_messages();
        let exporting = self.session.is_exporting();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Selecionar Amostras");
            ui.label(
                RichText::new(format!("Planilha: {} / {}", self.settings.sheet_name, self.settings.spreadsheet_id))
                    .color(Color32::from_gray(150))
                    .size(11.0),
            );
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let can_export = !exporting && !self.session.selector.is_empty();
                if ui.add_enabled(can_export, egui::Button::new("Gerar planilha")).clicked() {
                    self.start_export();
                }
                if ui.add_enabled(!exporting, egui::Button::new("Limpar")).clicked() {
                    self.session.on_clear();
                    self.status.clear();
                    self.focus_input = true;
                }
                ui.add_enabled(!exporting, egui::Checkbox::new(&mut self.dry_run, "Simulação"));
            });
            if exporting {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new());
                    ui.label(self.busy.label());
                });
            } else if !self.status.is_empty() {
                let color = outcome_color(self.session.last_outcome());
                ui.label(RichText::new(&self.status).color(color));
            }
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Escaneie o código de barras da amostra e pressione Enter");
            let response = ui.add_enabled(
                !exporting,
                egui::TextEdit::singleline(&mut self.session.pending_input)
                    .hint_text("Código da amostra")
                    .desired_width(f32::INFINITY),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.scan();
                self.focus_input = true;
            }
            if self.focus_input && !exporting {
                response.request_focus();
                self.focus_input = false;
            }
            ui.add_space(8.0);
            self.render_samples(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_select_common::{Error, MemoryTable, TableRow};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn lab_table() -> MemoryTable {
        let row = |cells: &[&str]| -> TableRow { cells.iter().map(|c| c.to_string()).collect() };
        MemoryTable::new(
            "Geral",
            vec![
                row(&["Data", "Cliente", "Obra", "Local", "Tipo", "Lote", "Amostra"]),
                row(&["01/03/2025", "Alfa", "Ponte", "P1", "Concreto", "L1", "S1"]),
            ],
        )
    }

    #[tokio::test]
    async fn test_source_connected_once_per_session() {
        let cell = OnceCell::new();
        let connects = AtomicUsize::new(0);
        let counter = &connects;
        let settings = Settings::default();
        let selector: SampleSelector = ["S1"].into_iter().collect();
        let (tx, rx) = mpsc::channel();

        for _ in 0..2 {
            let report = export_with_cached_source(
                &cell,
                || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(lab_table())
                },
                &settings,
                &selector,
                RunOptions::default(),
                &tx,
            )
            .await
            .unwrap();
            assert_eq!(report.positions, vec![2]);
        }

        assert_eq!(connects.load(Ordering::SeqCst), 1);
        // as duas exportações escreveram na mesma tabela
        assert_eq!(cell.get().unwrap().writes().len(), 4);
        assert!(matches!(rx.try_recv(), Ok(UiMessage::Phase(_))));
    }

    #[tokio::test]
    async fn test_failed_connection_is_retried() {
        let cell: OnceCell<MemoryTable> = OnceCell::new();
        let settings = Settings::default();
        let selector: SampleSelector = ["S1"].into_iter().collect();
        let (tx, _rx) = mpsc::channel();

        let err = export_with_cached_source(
            &cell,
            || async { Err(Error::Auth("token expirado".into())) },
            &settings,
            &selector,
            RunOptions::default(),
            &tx,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        assert!(cell.get().is_none());

        let report = export_with_cached_source(
            &cell,
            || async { Ok(lab_table()) },
            &settings,
            &selector,
            RunOptions::default(),
            &tx,
        )
        .await
        .unwrap();
        assert_eq!(report.artifact.row_count, 1);
    }

    #[tokio::test]
    async fn test_bad_date_format_fails_before_connecting() {
        let cell: OnceCell<MemoryTable> = OnceCell::new();
        let settings = Settings { date_format: "%d/%Q".into(), ..Default::default() };
        let selector: SampleSelector = ["S1"].into_iter().collect();
        let (tx, _rx) = mpsc::channel();

        let err = export_with_cached_source(
            &cell,
            || async { Ok(lab_table()) },
            &settings,
            &selector,
            RunOptions::default(),
            &tx,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(cell.get().is_none());
    }
}
