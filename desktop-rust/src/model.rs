use std::sync::mpsc::{Receiver, TryRecvError};

use sample_select_common::{Error, ExportReport, Phase, Result};

/// Mensagens da tarefa de exportação para a UI
pub enum UiMessage {
    Phase(Phase),
    Done(Result<ExportReport>),
}

/// Indicação de ocupado mostrada ao lado do botão
#[derive(Debug, Clone, Default)]
pub struct BusyState {
    pub phase: Option<Phase>,
}

impl BusyState {
    pub fn label(&self) -> String {
        match self.phase {
            Some(phase) => format!("[{}/3] {}", phase.step(), phase.label()),
            None => "Preparando...".to_string(),
        }
    }
}

/// Consome as mensagens pendentes; devolve o resultado quando a tarefa terminou
///
/// Canal fechado sem `Done` (tarefa abortada) também encerra a exportação.
pub fn drain_messages(rx: &Receiver<UiMessage>, busy: &mut BusyState) -> Option<Result<ExportReport>> {
    loop {
        match rx.try_recv() {
            Ok(UiMessage::Phase(phase)) => busy.phase = Some(phase),
            Ok(UiMessage::Done(result)) => return Some(result),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => {
                return Some(Err(Error::Export("a exportação foi interrompida".into())));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_busy_label() {
        assert_eq!(BusyState::default().label(), "Preparando...");
        let busy = BusyState { phase: Some(Phase::Writing) };
        assert_eq!(busy.label(), "[2/3] Atualizando status no Sheets...");
    }

    #[test]
    fn test_drain_tracks_phases() {
        let (tx, rx) = mpsc::channel();
        let mut busy = BusyState::default();
        tx.send(UiMessage::Phase(Phase::Fetching)).unwrap();
        tx.send(UiMessage::Phase(Phase::Writing)).unwrap();

        assert!(drain_messages(&rx, &mut busy).is_none());
        assert_eq!(busy.phase, Some(Phase::Writing));

        tx.send(UiMessage::Done(Err(Error::NoMatches))).unwrap();
        let done = drain_messages(&rx, &mut busy);
        assert!(matches!(done, Some(Err(Error::NoMatches))));
    }

    #[test]
    fn test_drain_worker_gone_without_result() {
        let (tx, rx) = mpsc::channel::<UiMessage>();
        let mut busy = BusyState::default();
        let worker = std::thread::spawn(move || {
            tx.send(UiMessage::Phase(Phase::Fetching)).unwrap();
            panic!("falha na tarefa");
        });
        assert!(worker.join().is_err());

        let done = drain_messages(&rx, &mut busy);
        assert!(matches!(done, Some(Err(Error::Export(_)))));
        assert_eq!(busy.phase, Some(Phase::Fetching));
    }
}
