//! Run Batch use case
//!
//! Drives generation and filtering over a slice of the dataset and appends
//! the results to the raw and final logs.
//!
//! Per record: `fetching → generating → logging-raw → filtering →
//! logging-final`. Records are processed one after another; the generation
//! calls inside a record may run concurrently.

mod types;

pub use types::{BatchReport, RecordOutcome, RecordStatus, RunBatchError, RunBatchInput};

use crate::config::{BatchParams, SplitParams};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{BatchProgressNotifier, NoProgress};
use crate::ports::record_source::RecordSource;
use crate::ports::split_sink::SplitSink;
use crate::use_cases::filter_candidates::FilterCandidatesUseCase;
use crate::use_cases::generate_candidates::GenerateCandidatesUseCase;
use atoss_domain::{OutputLine, Record, SplitPhase, decode_escapes};
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for running the split pipeline over a dataset slice
pub struct RunBatchUseCase<G: LlmGateway + 'static> {
    generator: GenerateCandidatesUseCase<G>,
    filter: FilterCandidatesUseCase<G>,
    select_count: usize,
    batch: BatchParams,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunBatchUseCase<G> {
    pub fn new(gateway: Arc<G>, split: SplitParams, batch: BatchParams) -> Self {
        Self {
            select_count: split.select_count,
            generator: GenerateCandidatesUseCase::new(Arc::clone(&gateway), split.clone()),
            filter: FilterCandidatesUseCase::new(gateway, split),
            batch,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token; checked between records
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        source: &dyn RecordSource,
        sink: &mut dyn SplitSink,
        input: RunBatchInput,
    ) -> Result<BatchReport, RunBatchError> {
        self.execute_with_progress(source, sink, input, &NoProgress)
            .await
    }

    /// Execute the use case with progress callbacks
    ///
    /// The sink is flushed before returning, on success and on error.
    pub async fn execute_with_progress(
        &self,
        source: &dyn RecordSource,
        sink: &mut dyn SplitSink,
        input: RunBatchInput,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<BatchReport, RunBatchError> {
        let result = self.run(source, sink, input, progress).await;

        match (result, sink.flush()) {
            (Ok(report), Ok(())) => Ok(report),
            (Ok(_), Err(e)) => Err(RunBatchError::Sink(e)),
            (Err(e), flushed) => {
                if let Err(flush_error) = flushed {
                    warn!("Failed to flush output after error: {}", flush_error);
                }
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        source: &dyn RecordSource,
        sink: &mut dyn SplitSink,
        input: RunBatchInput,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<BatchReport, RunBatchError> {
        let range = plan_range(input, source.len(), self.batch.record_cap)?;
        let mut report = BatchReport::new(&range);
        let started = Instant::now();

        info!(
            "Processing records {}..{} of {} ({} records)",
            range.start,
            range.end,
            source.name(),
            range.len()
        );
        progress.on_run_start(range.len());

        for index in range {
            if self.is_cancelled() {
                warn!("Cancelled before record {}", index);
                report.cancelled = true;
                break;
            }

            let record_started = Instant::now();
            progress.on_record_start(index);
            progress.on_phase(index, SplitPhase::Fetching);
            let record = source.record(index)?;

            let mut outcome = self.process_record(index, &record, sink, progress).await?;
            outcome.elapsed = record_started.elapsed();
            debug!(
                "Record {} processed in {:.2}s",
                index,
                outcome.elapsed.as_secs_f64()
            );

            report.absorb(&outcome);
            progress.on_record_complete(&outcome);

            if self.batch.report_every > 0 && report.processed % self.batch.report_every == 0 {
                info!("Processed {}/{}", report.processed, source.len());
            }
        }

        report.elapsed = started.elapsed();
        info!(
            "Batch finished: {} processed, {} raw lines, {} final lines in {:.1}s",
            report.processed,
            report.raw_lines,
            report.final_lines,
            report.elapsed.as_secs_f64()
        );
        progress.on_run_complete(&report);

        Ok(report)
    }

    async fn process_record(
        &self,
        index: usize,
        record: &Record,
        sink: &mut dyn SplitSink,
        progress: &dyn BatchProgressNotifier,
    ) -> Result<RecordOutcome, RunBatchError> {
        progress.on_phase(index, SplitPhase::Generating);
        let candidates = self.generator.execute(record).await?;
        if candidates.is_empty() {
            warn!("No candidates for record {}, skipping", index);
            return Ok(RecordOutcome::new(index, RecordStatus::NoCandidates));
        }

        let mut outcome = RecordOutcome::new(index, RecordStatus::Written);
        outcome.partial_candidates = !candidates.is_complete();

        progress.on_phase(index, SplitPhase::LoggingRaw);
        for candidate in candidates.items() {
            let text = decode_or_keep(candidate, &mut outcome.decode_fallbacks);
            sink.append_raw(&OutputLine::new(record.sentence(), &text))?;
            outcome.raw_lines += 1;
        }

        progress.on_phase(index, SplitPhase::Filtering);
        let selections = self
            .filter
            .execute(record, candidates.items(), self.select_count)
            .await?;
        if selections.is_empty() {
            warn!("No selections for record {}, skipping final output", index);
            outcome.status = RecordStatus::NoSelections;
            return Ok(outcome);
        }
        outcome.partial_selections = !selections.is_complete();

        progress.on_phase(index, SplitPhase::LoggingFinal);
        for selection in selections.items() {
            let text = decode_or_keep(selection, &mut outcome.decode_fallbacks);
            sink.append_final(&OutputLine::new(record.sentence(), &text))?;
            outcome.final_lines += 1;
        }

        Ok(outcome)
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Resolve the records to process: `start..min(end, len)`, cut to `cap`.
///
/// The cap always wins over a larger slice.
fn plan_range(input: RunBatchInput, len: usize, cap: usize) -> Result<Range<usize>, RunBatchError> {
    let RunBatchInput { start, end } = input;
    if start > end {
        return Err(RunBatchError::InvalidRange { start, end });
    }

    if end > len {
        warn!(
            "Requested end {} is past the dataset ({} records), clamping",
            end, len
        );
    }
    let end = end.min(len);
    let start = start.min(end);

    if end - start > cap {
        warn!(
            "Requested {} records, processing the first {} (record cap)",
            end - start,
            cap
        );
    }
    Ok(start..start + (end - start).min(cap))
}

fn decode_or_keep(text: &str, fallbacks: &mut usize) -> String {
    match decode_escapes(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!("Keeping undecoded text: {}", e);
            *fallbacks += 1;
            e.into_original()
        }
    }
}
