//! Roster-wide fan-out collector.
//!
//! One scrape cycle launches one independent poll task per roster entry,
//! then joins on all of them before returning — spawn-all, wait-all, with
//! no cap on the fan-out width. Tasks share nothing but the join point; a
//! failed or slow device never corrupts or blocks another device's result.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::metrics::{self, MetricDesc};
use crate::poller::StatusPoller;
use crate::types::TelemetrySample;

/// Executes one poll cycle across the whole device roster.
#[derive(Debug)]
pub struct FleetCollector {
    roster: Vec<String>,
    poller: StatusPoller,
    cycle_timeout: Duration,
    /// Serializes overlapping scrape requests so concurrent scrapes never
    /// double the transient load on the devices.
    cycle_gate: Mutex<()>,
}

impl FleetCollector {
    /// Create a collector over an immutable roster.
    ///
    /// `cycle_timeout` bounds the whole cycle even if every device stalls;
    /// it should exceed the poller's per-call deadline.
    #[must_use]
    pub fn new(roster: Vec<String>, poller: StatusPoller, cycle_timeout: Duration) -> Self {
        Self {
            roster,
            poller,
            cycle_timeout,
            cycle_gate: Mutex::new(()),
        }
    }

    /// The configured device roster.
    #[must_use]
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    /// Describe the metric series this collector can produce.
    #[must_use]
    pub fn describe_metrics(&self) -> &'static [MetricDesc] {
        metrics::DESCRIPTORS
    }

    /// Run exactly one poll cycle and return one sample per roster entry.
    ///
    /// The returned set carries no ordering guarantee. A failed poll
    /// contributes an unreachable sample for its host and nothing else;
    /// the cycle itself always completes.
    pub async fn collect_samples(&self) -> Vec<TelemetrySample> {
        let _cycle = self.cycle_gate.lock().await;
        let started = Instant::now();
        let deadline = started + self.cycle_timeout;

        let mut tasks = JoinSet::new();
        for (index, host) in self.roster.iter().cloned().enumerate() {
            let poller = self.poller;
            tasks.spawn(async move {
                let sample = match poller.poll(&host).await {
                    Ok(reply) => TelemetrySample::reachable(host, reply),
                    Err(err) => {
                        tracing::warn!(host = %host, error = %err, "device poll failed");
                        TelemetrySample::unreachable(host)
                    }
                };
                (index, sample)
            });
        }

        // Barrier join: gather every completion, bounded by the cycle
        // ceiling. Tasks still pending at the ceiling are aborted and
        // reported unreachable below.
        let mut slots: Vec<Option<TelemetrySample>> = vec![None; self.roster.len()];
        loop {
            match tokio::time::timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(Ok((index, sample)))) => {
                    slots[index] = Some(sample);
                }
                Ok(Some(Err(join_err))) => {
                    tracing::error!(error = %join_err, "poll task did not complete");
                }
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        elapsed = ?started.elapsed(),
                        "cycle ceiling reached, aborting remaining poll tasks"
                    );
                    tasks.abort_all();
                    while tasks.join_next().await.is_some() {}
                    break;
                }
            }
        }

        let samples: Vec<TelemetrySample> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| TelemetrySample::unreachable(self.roster[index].clone()))
            })
            .collect();

        tracing::debug!(
            devices = samples.len(),
            reachable = samples.iter().filter(|s| s.is_reachable()).count(),
            elapsed = ?started.elapsed(),
            "poll cycle complete"
        );
        samples
    }
}
