use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use newsdesk_core::{AppViewModel, Msg};
use newsdesk_logging::news_debug;

use crate::ViewStateController;

enum EngineCommand {
    Dispatch(Msg),
}

/// Runs a [`ViewStateController`] on a background tokio runtime.
///
/// Each message becomes its own task, so a message sent while a fetch is
/// outstanding reaches the controller immediately and is dropped by its
/// single-flight guard instead of waiting in a queue.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    controller: Arc<ViewStateController>,
    worker: thread::JoinHandle<()>,
}

impl EngineHandle {
    pub fn new(controller: Arc<ViewStateController>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let worker_controller = controller.clone();

        let worker = thread::Builder::new()
            .name("newsdesk-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let controller = worker_controller.clone();
                    runtime.spawn(async move {
                        handle_command(&controller, command).await;
                    });
                }
                news_debug!("engine command channel closed; stopping runtime");
            })?;

        Ok(Self {
            cmd_tx,
            controller,
            worker,
        })
    }

    pub fn dispatch(&self, msg: Msg) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch(msg));
    }

    pub fn view(&self) -> AppViewModel {
        self.controller.view()
    }

    /// Stops accepting messages and waits for the runtime thread to exit.
    /// Requests still in flight are abandoned.
    pub fn shutdown(self) {
        drop(self.cmd_tx);
        let _ = self.worker.join();
    }
}

async fn handle_command(controller: &ViewStateController, command: EngineCommand) {
    match command {
        EngineCommand::Dispatch(msg) => controller.dispatch(msg).await,
    }
}
