//! Fan-out aggregator
//!
//! Queries several warehouses concurrently and sums what comes back in time.
//!
//! # Task model
//!
//! ```text
//! aggregate(ids)
//!   ├─ spawn one task per id on a JoinSet   (exactly ids.len() tasks)
//!   │    └─ probe.check(id) under per_call_timeout, panics caught
//!   ├─ collect (index, outcome) into a pre-allocated slot per task
//!   │    until all tasks finish or the overall deadline fires
//!   └─ deadline: abort_all() + drain, late results discarded
//! ```
//!
//! Each slot is written once, by the collector, from the result of the one
//! task that owns its index. The slot vector lives on the aggregating call's
//! stack, so a probe finishing after the deadline has nowhere to write.
//!
//! # Reduction
//!
//! Sum of successful slots. Failed, panicked, timed out and unfinished
//! probes contribute zero. Neither partial completion nor probe failure is
//! reported as an error.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::ports::warehouse::{ProbeError, WarehouseProbe};

/// State of one probe's slot after aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Probe returned a value
    Done(u64),
    /// Probe failed, timed out on its own deadline, or panicked
    Failed(ProbeError),
    /// Probe was still running at the overall deadline and was aborted
    Unfinished,
}

/// Result slot for one launched probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub source_id: String,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    fn pending(source_id: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            outcome: ProbeOutcome::Unfinished,
        }
    }

    pub fn value(&self) -> Option<u64> {
        match self.outcome {
            ProbeOutcome::Done(value) => Some(value),
            _ => None,
        }
    }
}

/// Detailed outcome of one aggregation
#[derive(Debug, Clone)]
pub struct FanOutReport {
    /// Sum over successful probes
    pub total: u64,
    /// One slot per requested id, in request order
    pub slots: Vec<ProbeResult>,
    /// Wall-clock time spent in `aggregate`
    pub elapsed: Duration,
}

impl FanOutReport {
    pub fn completed(&self) -> usize {
        self.slots.iter().filter(|s| s.value().is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.outcome, ProbeOutcome::Failed(_)))
            .count()
    }

    pub fn unfinished(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.outcome == ProbeOutcome::Unfinished)
            .count()
    }

    /// Whether every probe answered successfully
    pub fn is_complete(&self) -> bool {
        self.completed() == self.slots.len()
    }
}

/// Runs warehouse probes in parallel under a deadline
#[derive(Clone)]
pub struct FanOutAggregator {
    probe: Arc<dyn WarehouseProbe>,
}

impl FanOutAggregator {
    pub fn new(probe: Arc<dyn WarehouseProbe>) -> Self {
        Self { probe }
    }

    /// Sum of stock across `ids`, best effort.
    pub async fn aggregate(
        &self,
        ids: &[String],
        per_call_timeout: Duration,
        overall_timeout: Duration,
    ) -> u64 {
        self.aggregate_detailed(ids, per_call_timeout, overall_timeout)
            .await
            .total
    }

    /// Like [`aggregate`](Self::aggregate), keeping the per-probe slots.
    pub async fn aggregate_detailed(
        &self,
        ids: &[String],
        per_call_timeout: Duration,
        overall_timeout: Duration,
    ) -> FanOutReport {
        let start = Instant::now();
        let deadline = start + overall_timeout;

        let mut slots: Vec<ProbeResult> = ids.iter().map(|id| ProbeResult::pending(id)).collect();
        let mut join_set = JoinSet::new();

        for (index, id) in ids.iter().enumerate() {
            let probe = Arc::clone(&self.probe);
            let id = id.clone();

            join_set.spawn(async move {
                let guarded = tokio::time::timeout(per_call_timeout, probe.check(&id));
                let outcome = match AssertUnwindSafe(guarded).catch_unwind().await {
                    Ok(Ok(result)) => result,
                    Ok(Err(_)) => Err(ProbeError::Timeout(id.clone())),
                    Err(_) => Err(ProbeError::Panicked(id.clone())),
                };
                (index, outcome)
            });
        }

        let expiry = tokio::time::sleep_until(deadline);
        tokio::pin!(expiry);

        loop {
            tokio::select! {
                biased;
                joined = join_set.join_next() => match joined {
                    None => break,
                    Some(Ok((index, Ok(value)))) => {
                        debug!(warehouse = %slots[index].source_id, value, "probe completed");
                        slots[index].outcome = ProbeOutcome::Done(value);
                    }
                    Some(Ok((index, Err(e)))) => {
                        warn!(
                            warehouse = %slots[index].source_id,
                            error = %e,
                            "probe failed, counting as zero"
                        );
                        slots[index].outcome = ProbeOutcome::Failed(e);
                    }
                    Some(Err(e)) => {
                        // Only reachable if the runtime cancels a task under us
                        warn!("probe task join error: {}", e);
                    }
                },
                _ = &mut expiry => {
                    warn!(
                        outstanding = join_set.len(),
                        timeout_ms = overall_timeout.as_millis() as u64,
                        "fan-out deadline reached, returning partial result"
                    );
                    join_set.abort_all();
                    break;
                }
            }
        }

        // Account for every aborted task; whatever they produced is discarded
        while join_set.join_next().await.is_some() {}

        let total = slots.iter().filter_map(ProbeResult::value).sum();
        let report = FanOutReport {
            total,
            slots,
            elapsed: start.elapsed(),
        };

        debug!(
            total = report.total,
            completed = report.completed(),
            failed = report.failed(),
            unfinished = report.unfinished(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "fan-out finished"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory probe with per-id latency and failure behavior
    struct FakeProbe {
        stock: HashMap<&'static str, u64>,
        latency: Duration,
        slow: HashMap<&'static str, Duration>,
        failing: Vec<&'static str>,
        panicking: Vec<&'static str>,
        started: AtomicUsize,
        finished: Arc<AtomicUsize>,
    }

    impl FakeProbe {
        fn new() -> Self {
            Self {
                stock: HashMap::from([("A", 10), ("B", 5), ("C", 15)]),
                latency: Duration::from_millis(300),
                slow: HashMap::new(),
                failing: Vec::new(),
                panicking: Vec::new(),
                started: AtomicUsize::new(0),
                finished: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl WarehouseProbe for FakeProbe {
        async fn check(&self, warehouse: &str) -> Result<u64, ProbeError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            let latency = self.slow.get(warehouse).copied().unwrap_or(self.latency);
            tokio::time::sleep(latency).await;
            self.finished.fetch_add(1, Ordering::SeqCst);

            if self.panicking.contains(&warehouse) {
                panic!("probe for {} exploded", warehouse);
            }
            if self.failing.contains(&warehouse) {
                return Err(ProbeError::Unavailable(warehouse.to_string()));
            }
            Ok(self.stock.get(warehouse).copied().unwrap_or(0))
        }
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const GENEROUS: Duration = Duration::from_secs(5);

    #[tokio::test(start_paused = true)]
    async fn test_sum_of_all_warehouses() {
        let aggregator = FanOutAggregator::new(Arc::new(FakeProbe::new()));
        let total = aggregator.aggregate(&ids(&["A", "B", "C"]), GENEROUS, GENEROUS).await;
        assert_eq!(total, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_probes_run_in_parallel() {
        let aggregator = FanOutAggregator::new(Arc::new(FakeProbe::new()));
        let report = aggregator
            .aggregate_detailed(&ids(&["A", "B", "C"]), GENEROUS, GENEROUS)
            .await;

        assert!(report.is_complete());
        // Three 300ms probes in parallel take ~300ms, not ~900ms
        assert!(report.elapsed < Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_failure_is_excluded() {
        let mut probe = FakeProbe::new();
        probe.failing.push("A");
        let aggregator = FanOutAggregator::new(Arc::new(probe));

        let report = aggregator
            .aggregate_detailed(&ids(&["A", "B", "C"]), GENEROUS, GENEROUS)
            .await;

        assert_eq!(report.total, 20);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.completed(), 2);
        assert_eq!(
            report.slots[0].outcome,
            ProbeOutcome::Failed(ProbeError::Unavailable("A".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_probe_counts_as_zero() {
        let mut probe = FakeProbe::new();
        probe.panicking.push("C");
        let aggregator = FanOutAggregator::new(Arc::new(probe));

        let report = aggregator
            .aggregate_detailed(&ids(&["A", "B", "C"]), GENEROUS, GENEROUS)
            .await;

        assert_eq!(report.total, 15);
        assert_eq!(
            report.slots[2].outcome,
            ProbeOutcome::Failed(ProbeError::Panicked("C".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_overall_deadline_returns_partial_sum() {
        let mut probe = FakeProbe::new();
        probe.slow.insert("C", Duration::from_secs(10));
        let finished = Arc::clone(&probe.finished);
        let aggregator = FanOutAggregator::new(Arc::new(probe));

        let start = Instant::now();
        let report = aggregator
            .aggregate_detailed(&ids(&["A", "B", "C"]), GENEROUS, Duration::from_secs(1))
            .await;

        assert_eq!(report.total, 15);
        assert_eq!(report.unfinished(), 1);
        assert!(start.elapsed() <= Duration::from_millis(1050));

        // The aborted probe never completes later
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_before_any_probe_finishes() {
        let aggregator = FanOutAggregator::new(Arc::new(FakeProbe::new()));
        let start = Instant::now();

        let total = aggregator
            .aggregate(&ids(&["A", "B", "C"]), GENEROUS, Duration::from_millis(100))
            .await;

        assert_eq!(total, 0);
        assert!(start.elapsed() <= Duration::from_millis(150));
    }

    #[tokio::test(start_paused = true)]
    async fn test_per_call_timeout_counts_as_failure() {
        let mut probe = FakeProbe::new();
        probe.slow.insert("B", Duration::from_secs(3));
        let aggregator = FanOutAggregator::new(Arc::new(probe));

        let report = aggregator
            .aggregate_detailed(&ids(&["A", "B", "C"]), Duration::from_secs(1), GENEROUS)
            .await;

        assert_eq!(report.total, 25);
        assert_eq!(
            report.slots[1].outcome,
            ProbeOutcome::Failed(ProbeError::Timeout("B".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_and_empty_ids() {
        let probe = Arc::new(FakeProbe::new());
        let aggregator = FanOutAggregator::new(probe.clone());

        assert_eq!(aggregator.aggregate(&ids(&["Z"]), GENEROUS, GENEROUS).await, 0);

        let report = aggregator.aggregate_detailed(&[], GENEROUS, GENEROUS).await;
        assert_eq!(report.total, 0);
        assert!(report.slots.is_empty());
        assert_eq!(probe.started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sum_never_exceeds_known_total() {
        let known: u64 = 30;
        for overall_ms in [50, 250, 350, 2_000] {
            let mut probe = FakeProbe::new();
            probe.slow.insert("A", Duration::from_millis(200));
            probe.slow.insert("C", Duration::from_millis(600));
            let aggregator = FanOutAggregator::new(Arc::new(probe));

            let total = aggregator
                .aggregate(
                    &ids(&["A", "B", "C"]),
                    GENEROUS,
                    Duration::from_millis(overall_ms),
                )
                .await;
            assert!(total <= known);
            if overall_ms >= 2_000 {
                assert_eq!(total, known);
            }
        }
    }
}
