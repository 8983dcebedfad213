use std::time::Duration;

use log::info;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// One beat of the auto-spawn driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnTick {
    /// Run that produced the tick. Every `start()` begins a new run.
    pub generation: u64,
    pub fired_at: Instant,
}

/// Sends a [`SpawnTick`] every `period` while running.
///
/// Ticks travel through a channel, so some may still be queued after `stop()`.
/// [`AutoSpawnDriver::accepts`] tells which of them still count.
///
/// Must be started from within a tokio runtime.
pub struct AutoSpawnDriver {
    period: Duration,
    tx: UnboundedSender<SpawnTick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
    stopped_at: Option<Instant>,
}

impl AutoSpawnDriver {
    pub fn new(period: Duration, tx: UnboundedSender<SpawnTick>) -> Self {
        Self {
            period,
            tx,
            task: None,
            generation: 0,
            stopped_at: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// No-op when already running. The first tick arrives one full period later.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        self.generation += 1;
        self.stopped_at = None;
        let generation = self.generation;
        let period = self.period;
        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let fired_at = ticker.tick().await;
                if tx.send(SpawnTick { generation, fired_at }).is_err() {
                    break;
                }
            }
        }));
        info!("auto-spawn started every {:?}", period);
    }

    /// No-op when already stopped.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.stopped_at = Some(Instant::now());
            info!("auto-spawn stopped");
        }
    }

    /// Stops and drops every tick still in flight, including those that fired before the stop.
    pub fn discard(&mut self) {
        self.stop();
        self.generation += 1;
        self.stopped_at = None;
    }

    /// Whether `tick` still counts: it belongs to the latest run and fired
    /// while that run was going. Ticks from earlier runs never count.
    pub fn accepts(&self, tick: &SpawnTick) -> bool {
        if tick.generation != self.generation || self.generation == 0 {
            return false;
        }
        match self.stopped_at {
            None => self.task.is_some(),
            Some(stopped_at) => tick.fired_at <= stopped_at,
        }
    }

    /// Flips the running state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.is_running()
    }
}

impl Drop for AutoSpawnDriver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
