//! Cron-based scheduler that periodically runs the pipeline

use std::str::FromStr;
use std::sync::Arc;

use cron::Schedule;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::core::runtime::{SignalRuntime, SymbolEvaluation};

/// Cron expression firing every `interval_seconds`.
///
/// Cron format: second minute hour day month weekday
pub fn cron_expression(
    interval_seconds: u64,
) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
    if interval_seconds == 0 {
        return Err("Scheduler disabled: interval_seconds is 0".into());
    }
    if interval_seconds >= 60 {
        Ok(format!("0 */{} * * * *", interval_seconds / 60))
    } else {
        Ok(format!("*/{} * * * * *", interval_seconds))
    }
}

/// Scheduler that evaluates every symbol on each tick and forwards the
/// results to a channel consumer
pub struct JobScheduler {
    runtime: Arc<SignalRuntime>,
    schedule: Schedule,
    sender: mpsc::Sender<Vec<SymbolEvaluation>>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl JobScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `runtime` - Pipeline runtime holding the per-symbol analyzers
    /// * `interval_seconds` - Evaluation interval in seconds (0 = disabled)
    /// * `sender` - Receives one batch of evaluations per tick
    pub fn new(
        runtime: Arc<SignalRuntime>,
        interval_seconds: u64,
        sender: mpsc::Sender<Vec<SymbolEvaluation>>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let cron_expr = cron_expression(interval_seconds)?;
        let schedule = Schedule::from_str(&cron_expr).map_err(|e| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid cron expression '{}': {}", cron_expr, e),
            )) as Box<dyn std::error::Error + Send + Sync>
        })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            "JobScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            runtime,
            schedule,
            sender,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let runtime = self.runtime.clone();
        let schedule = self.schedule.clone();
        let sender = self.sender.clone();

        let handle = tokio::spawn(async move {
            info!("JobScheduler: started, waiting for cron schedule...");

            loop {
                let next_tick = schedule.upcoming(chrono::Utc).next();
                if let Some(next_tick) = next_tick {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                debug!(
                    symbol_count = runtime.symbols().len(),
                    "JobScheduler: cron tick, evaluating {} symbols",
                    runtime.symbols().len()
                );

                let evaluations = runtime.evaluate_all().await;
                if sender.send(evaluations).await.is_err() {
                    warn!("JobScheduler: receiver dropped, stopping");
                    break;
                }
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            warn!("JobScheduler: start called while running, replacing previous task");
            previous.abort();
        }
        info!("JobScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("JobScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
