//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut Option<String>,
) {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = Some("UI command queue is full; please retry".to_string());
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = Some(
                "Prediction worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use shared::domain::TopN;

    #[test]
    fn queues_command_when_worker_is_listening() {
        let (tx, rx) = bounded(1);
        let mut status = None;
        dispatch_backend_command(&tx, BackendCommand::ExampleClicked { index: 2 }, &mut status);
        assert!(status.is_none());
        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::ExampleClicked { index: 2 })
        ));
    }

    #[test]
    fn reports_full_and_disconnected_queues() {
        let (tx, rx) = bounded(1);
        let mut status = None;
        let submit = || BackendCommand::Submit {
            sequence: "MKV".to_string(),
            top_n: TopN::All,
        };
        dispatch_backend_command(&tx, submit(), &mut status);
        dispatch_backend_command(&tx, submit(), &mut status);
        assert_eq!(status.as_deref(), Some("UI command queue is full; please retry"));

        drop(rx);
        dispatch_backend_command(&tx, submit(), &mut status);
        assert!(status.as_deref().is_some_and(|s| s.contains("disconnected")));
    }
}
