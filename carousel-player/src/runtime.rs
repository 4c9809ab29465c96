//! Single-task host for a [`CarouselController`].
//!
//! One tokio task owns the controller. Inputs, resize notifications and
//! snapshot requests arrive over an mpsc channel and are handled one at a
//! time, so each handler reads, computes, writes and renders the position
//! before the next one starts. Between messages the task sleeps until the
//! earlier of the auto-advance deadline and the resize-settle deadline.

use std::time::Instant as StdInstant;

use carousel_core::{
    CarouselController, CarouselSnapshot, InputEvent, ResizeDebouncer,
    SlideGeometry, TrackSink,
};
use thiserror::Error;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{self, Instant},
};

const COMMAND_BUFFER: usize = 64;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("carousel runtime has shut down")]
    Closed,
    #[error("carousel runtime task failed")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug)]
enum Command {
    Input(InputEvent),
    Resize(SlideGeometry),
    Snapshot(oneshot::Sender<CarouselSnapshot>),
}

/// Client side of a running carousel. Dropping it (or calling
/// [`shutdown`](Self::shutdown)) stops the loop and its timer.
#[derive(Debug)]
pub struct CarouselHandle {
    tx: mpsc::Sender<Command>,
    task: JoinHandle<CarouselSnapshot>,
}

impl CarouselHandle {
    pub async fn input(&self, event: InputEvent) -> Result<(), RuntimeError> {
        self.send(Command::Input(event)).await
    }

    /// Report a viewport resize with the geometry measured after it. Bursts
    /// are coalesced; only the last geometry of a burst is applied.
    pub async fn resize(
        &self,
        geometry: SlideGeometry,
    ) -> Result<(), RuntimeError> {
        self.send(Command::Resize(geometry)).await
    }

    pub async fn snapshot(&self) -> Result<CarouselSnapshot, RuntimeError> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Stop the loop after it drains queued commands and return the final
    /// state. The timer is cancelled before the task exits.
    pub async fn shutdown(self) -> Result<CarouselSnapshot, RuntimeError> {
        let Self { tx, task } = self;
        drop(tx);
        Ok(task.await?)
    }

    async fn send(&self, command: Command) -> Result<(), RuntimeError> {
        self.tx.send(command).await.map_err(|_| RuntimeError::Closed)
    }
}

#[derive(Debug)]
pub struct CarouselRuntime<S> {
    controller: CarouselController<S>,
    debouncer: ResizeDebouncer,
    pending_geometry: Option<SlideGeometry>,
    commands: mpsc::Receiver<Command>,
}

impl<S> CarouselRuntime<S>
where
    S: TrackSink + Send + 'static,
{
    /// Spawn the loop on the current tokio runtime. Auto-advance starts as
    /// soon as the task runs, mirroring a page that has finished loading.
    pub fn spawn(controller: CarouselController<S>) -> CarouselHandle {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let runtime = Self {
            debouncer: ResizeDebouncer::new(controller.config().resize_debounce),
            controller,
            pending_geometry: None,
            commands,
        };
        let task = tokio::spawn(runtime.run());
        CarouselHandle { tx, task }
    }

    async fn run(mut self) -> CarouselSnapshot {
        self.controller.start_auto_advance(now());

        loop {
            let tick_at = self.controller.next_tick();
            let settle_at = self.debouncer.deadline();

            tokio::select! {
                biased;
                command = self.commands.recv() => match command {
                    Some(command) => self.dispatch(command),
                    None => break,
                },
                _ = sleep_until(tick_at) => {
                    self.controller.poll_auto_advance(now());
                }
                _ = sleep_until(settle_at) => {
                    self.settle_resize();
                }
            }
        }

        self.controller.stop_auto_advance();
        self.debouncer.cancel();
        log::debug!("Carousel runtime stopped");
        self.controller.snapshot()
    }

    fn dispatch(&mut self, command: Command) {
        match command {
            Command::Input(event) => {
                self.controller.handle_input(event, now());
            }
            Command::Resize(geometry) => {
                log::trace!("Carousel resize queued: {:?}", geometry);
                self.pending_geometry = Some(geometry);
                self.debouncer.touch(now());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.controller.snapshot());
            }
        }
    }

    fn settle_resize(&mut self) {
        if !self.debouncer.poll(now()) {
            return;
        }
        if let Some(geometry) = self.pending_geometry.take() {
            self.controller.recompute_bounds(geometry);
        }
    }
}

fn now() -> StdInstant {
    Instant::now().into_std()
}

async fn sleep_until(deadline: Option<StdInstant>) {
    match deadline {
        Some(deadline) => time::sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
