//! Destinations for batch results.
//!
//! A sink is acquired once per batch, passed by `&mut` to [`crate::pipeline::Pipeline::run_into`],
//! and finished when the batch is done. The selection passed with each write identifies the
//! target table; selector 0 is also the degree 0 table.
use std::io::Write;

use crate::{
    degree::DegreeSelection,
    error::Result,
    pipeline::{BatchReport, FunctionFailure, FunctionOutcome, FunctionReport},
};

/// Receives the outcomes of a batch.
pub trait ResultSink {
    /// Records a completed function.
    ///
    /// # Errors
    /// Returns an error if the result cannot be stored.
    fn write_report(&mut self, selection: &DegreeSelection, report: &FunctionReport) -> Result<()>;

    /// Records a function that failed.
    ///
    /// # Errors
    /// Returns an error if the failure cannot be stored.
    fn write_failure(
        &mut self,
        selection: &DegreeSelection,
        failure: &FunctionFailure,
    ) -> Result<()>;

    /// Called once after the last write of a batch.
    ///
    /// # Errors
    /// Returns an error if buffered results cannot be flushed.
    fn finish(&mut self) -> Result<()>;
}

impl<S: ResultSink + ?Sized> ResultSink for Box<S> {
    fn write_report(&mut self, selection: &DegreeSelection, report: &FunctionReport) -> Result<()> {
        (**self).write_report(selection, report)
    }

    fn write_failure(
        &mut self,
        selection: &DegreeSelection,
        failure: &FunctionFailure,
    ) -> Result<()> {
        (**self).write_failure(selection, failure)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Keeps every result in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    reports: Vec<(DegreeSelection, FunctionReport)>,
    failures: Vec<(DegreeSelection, FunctionFailure)>,
    finished: bool,
}
impl MemorySink {
    /// Completed functions, in the order they were written.
    #[must_use]
    pub fn reports(&self) -> &[(DegreeSelection, FunctionReport)] {
        &self.reports
    }

    /// Failed functions, in the order they were written.
    #[must_use]
    pub fn failures(&self) -> &[(DegreeSelection, FunctionFailure)] {
        &self.failures
    }

    /// Whether [`ResultSink::finish`] was called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl ResultSink for MemorySink {
    fn write_report(&mut self, selection: &DegreeSelection, report: &FunctionReport) -> Result<()> {
        self.reports.push((*selection, report.clone()));
        Ok(())
    }

    fn write_failure(
        &mut self,
        selection: &DegreeSelection,
        failure: &FunctionFailure,
    ) -> Result<()> {
        self.failures.push((*selection, failure.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes the whole batch as one JSON document when finished.
///
/// The document is a serialized [`BatchReport`]: the selection, then one outcome per function
/// tagged with `"status": "completed"` or `"status": "failed"`. A sink that is used for several
/// batches writes one document per batch, each followed by a newline.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
    pretty: bool,
    selection: Option<DegreeSelection>,
    outcomes: Vec<FunctionOutcome>,
}
impl<W: Write> JsonSink<W> {
    /// Compact JSON on `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            selection: None,
            outcomes: Vec::new(),
        }
    }

    /// Indented JSON on `writer`.
    pub fn pretty(writer: W) -> Self {
        Self {
            pretty: true,
            ..Self::new(writer)
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn record(&mut self, selection: &DegreeSelection, outcome: FunctionOutcome) {
        self.selection.get_or_insert(*selection);
        self.outcomes.push(outcome);
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn write_report(&mut self, selection: &DegreeSelection, report: &FunctionReport) -> Result<()> {
        self.record(selection, FunctionOutcome::Completed(report.clone()));
        Ok(())
    }

    fn write_failure(
        &mut self,
        selection: &DegreeSelection,
        failure: &FunctionFailure,
    ) -> Result<()> {
        self.record(selection, FunctionOutcome::Failed(failure.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let Some(selection) = self.selection.take() else {
            log::debug!("Nothing was written to the JSON sink");
            return Ok(());
        };

        let document = BatchReport {
            selection,
            outcomes: std::mem::take(&mut self.outcomes),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;

        log::debug!(
            "Wrote {} outcomes for selector {}",
            document.outcomes.len(),
            selection.selector
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::RunConfig, pipeline::Pipeline};

    use super::*;

    fn small_pipeline() -> Pipeline {
        let config = RunConfig {
            grid_points: 21,
            fit_samples: 30,
            ..RunConfig::default()
        };
        Pipeline::new(config).unwrap()
    }

    #[test]
    fn test_memory_sink() {
        let pipeline = small_pipeline();
        let selection = DegreeSelection::from_selector(2);
        let mut sink = MemorySink::default();
        pipeline.run_into(selection, &mut sink).unwrap();

        assert_eq!(sink.reports().len(), 13);
        assert!(sink.failures().is_empty());
        assert!(sink.reports().iter().all(|(s, _)| *s == selection));
        assert!(sink.is_finished());
    }

    #[test]
    fn test_json_round_trip() {
        let pipeline = small_pipeline();
        let selection = DegreeSelection::from_selector(12);

        let mut sink = JsonSink::new(Vec::new());
        let batch = pipeline.run_into(selection, &mut sink).unwrap();

        let bytes = sink.into_inner();
        let parsed: BatchReport = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.selection.degree, 20);
        assert_eq!(parsed.outcomes.len(), 13);
        assert_eq!(parsed, batch);

        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["outcomes"][0]["status"], "completed");
        assert_eq!(value["outcomes"][0]["name"], "exp");
    }

    #[test]
    fn test_json_failure_and_empty() {
        let selection = DegreeSelection::from_selector(1);
        let failure = FunctionFailure {
            index: 7,
            name: "csc".to_string(),
            error: "csc(x) is not finite at x = 0".to_string(),
        };

        let mut sink = JsonSink::pretty(Vec::new());
        sink.write_failure(&selection, &failure).unwrap();
        sink.finish().unwrap();

        let parsed: BatchReport = serde_json::from_slice(&sink.into_inner()).unwrap();
        assert_eq!(parsed.outcomes, vec![FunctionOutcome::Failed(failure)]);

        let mut empty = JsonSink::new(Vec::new());
        empty.finish().unwrap();
        assert!(empty.into_inner().is_empty());
    }
}
