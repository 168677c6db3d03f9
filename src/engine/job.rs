//! Fan-out of fetch units across parameter values

use super::fetcher::Fetcher;
use super::types::{JobStats, UnitOutcome};
use crate::config::{JobConfig, DEFAULT_CONCURRENCY};
use crate::error::{Error, Result};
use crate::output::RecordSink;
use crate::types::OutputRecord;
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{info, info_span, warn, Instrument};

/// Records buffered between the fetch units and the sink, per unit slot
const RECORD_BUFFER_PER_UNIT: usize = 4;

/// Runs one fetch unit per parameter value
#[derive(Debug, Clone)]
pub struct Job {
    fetcher: Fetcher,
    concurrency: usize,
    fail_fast: bool,
}

impl Job {
    /// Create a job around a fetcher
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            concurrency: DEFAULT_CONCURRENCY,
            fail_fast: false,
        }
    }

    /// Create a job from a validated config
    pub fn from_config(config: &JobConfig) -> Result<Self> {
        Ok(Self::new(Fetcher::from_config(config)?)
            .with_concurrency(config.concurrency)
            .with_fail_fast(config.fail_fast))
    }

    /// Set the number of units run at the same time
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set fail fast mode
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run every unit and hand records to the sink as they arrive
    ///
    /// Records of one unit reach the sink in page order; records of
    /// different units may interleave. A failed unit is recorded in the
    /// returned stats and the remaining units keep running, unless fail-fast
    /// is set, in which case the first unit error is returned. The sink is
    /// finished in both cases, so records emitted before a failure are kept.
    /// If the sink itself fails, no further pages or units are fetched and
    /// the sink error is returned.
    pub async fn run(&self, params: Vec<String>, sink: &mut dyn RecordSink) -> Result<JobStats> {
        let start = Instant::now();
        let total = params.len();
        info!(
            "Starting job: {total} parameters, concurrency {}",
            self.concurrency
        );

        let (tx, rx) = mpsc::channel::<OutputRecord>(self.concurrency * RECORD_BUFFER_PER_UNIT);

        let producer = async move {
            let mut stats = JobStats::new();
            let mut units = stream::iter(params.into_iter().enumerate())
                .map(|(index, param)| self.run_unit(index, param, tx.clone()))
                .buffer_unordered(self.concurrency);

            while let Some(mut outcome) = units.next().await {
                if self.fail_fast {
                    if let Some(error) = outcome.error.take() {
                        warn!("Aborting job: parameter '{}' failed", outcome.param);
                        return Err(error);
                    }
                }
                let sink_gone = outcome.error.as_ref().is_some_and(|e| !e.is_unit_local());
                stats.add_outcome(&outcome);
                if sink_gone {
                    warn!("Record sink closed; remaining parameters are not fetched");
                    break;
                }
            }
            Ok(stats)
        };

        let consumer = async {
            // owned here so the channel closes if the sink fails
            let mut rx = rx;
            let mut emitted = 0usize;
            while let Some(record) = rx.recv().await {
                sink.emit(record).await?;
                emitted += 1;
            }
            Ok::<usize, Error>(emitted)
        };

        let (produced, consumed) = tokio::join!(producer, consumer);
        let emitted = consumed?;
        sink.finish().await?;

        let mut stats = produced?;
        #[allow(clippy::cast_possible_truncation)]
        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            "Job complete: {}/{} parameters succeeded, {emitted} records in {}ms",
            stats.units_succeeded, stats.units_total, stats.duration_ms
        );
        Ok(stats)
    }

    /// Fetch all pages of one parameter, forwarding records as they arrive
    async fn run_unit(
        &self,
        index: usize,
        param: String,
        tx: mpsc::Sender<OutputRecord>,
    ) -> UnitOutcome {
        let span = info_span!("unit", index, param = %param);

        async move {
            let records = self.fetcher.process(&param);
            futures::pin_mut!(records);

            let mut emitted = 0;
            loop {
                // no further requests once the sink is gone
                if tx.is_closed() {
                    return UnitOutcome::failed(
                        index,
                        param,
                        emitted,
                        Error::output("record sink closed"),
                    );
                }
                let Some(item) = records.next().await else {
                    break;
                };
                match item {
                    Ok(record) => {
                        if tx.send(record).await.is_err() {
                            return UnitOutcome::failed(
                                index,
                                param,
                                emitted,
                                Error::output("record sink closed"),
                            );
                        }
                        emitted += 1;
                    }
                    Err(e) => {
                        warn!("Parameter failed after {emitted} records: {e}");
                        return UnitOutcome::failed(index, param, emitted, e);
                    }
                }
            }

            UnitOutcome::succeeded(index, param, emitted)
        }
        .instrument(span)
        .await
    }
}
