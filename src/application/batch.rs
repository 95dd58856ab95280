//! Batch analysis and ranking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::{future, stream, StreamExt};
use serde::Serialize;
use tokio::sync::watch;
use tracing::info;

use super::analyzer::ArbitrageEngine;
use crate::domain::analysis::rank;
use crate::domain::{AnalysisResult, Outcome, Skipped};

/// Ranked results of one batch run.
///
/// The ranking is computed once; iterating the report again only re-reads
/// the stored results.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    results: Vec<AnalysisResult>,
    skipped: Vec<Skipped>,
    cancelled: bool,
    generated_at: DateTime<Utc>,
}

impl BatchReport {
    /// Results ordered by ROI, best first.
    pub fn iter(&self) -> std::slice::Iter<'_, AnalysisResult> {
        self.results.iter()
    }

    /// Results with a positive profit, in rank order.
    pub fn profitable(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.results.iter().filter(|result| result.is_profitable())
    }

    /// Candidates that produced no result, in input order.
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// Whether the run stopped before every candidate was started.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a BatchReport {
    type Item = &'a AnalysisResult;
    type IntoIter = std::slice::Iter<'a, AnalysisResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Runs the engine over many candidates and ranks the results.
pub struct BatchRanker {
    engine: Arc<ArbitrageEngine>,
    concurrency: usize,
}

impl BatchRanker {
    /// `concurrency` bounds how many candidates are analyzed at once; it is
    /// raised to 1 if zero.
    pub fn new(engine: Arc<ArbitrageEngine>, concurrency: usize) -> Self {
        Self {
            engine,
            concurrency: concurrency.max(1),
        }
    }

    pub fn engine(&self) -> &ArbitrageEngine {
        &self.engine
    }

    /// Analyze and rank `candidates`.
    ///
    /// `cancel` is checked before each candidate is started; once it reads
    /// `true` no further candidates start and the results gathered so far are
    /// returned.
    pub async fn rank_all(&self, candidates: &[String], cancel: &watch::Receiver<bool>) -> BatchReport {
        self.rank_all_with_progress(candidates, cancel, |_, _| {}).await
    }

    /// Like [`rank_all`](Self::rank_all), calling `progress` with the number of
    /// finished candidates and each outcome as it completes.
    pub async fn rank_all_with_progress<P>(
        &self,
        candidates: &[String],
        cancel: &watch::Receiver<bool>,
        mut progress: P,
    ) -> BatchReport
    where
        P: FnMut(usize, &Outcome),
    {
        let engine = &self.engine;
        let outcomes: Vec<Outcome> = stream::iter(candidates)
            .take_while(|_| future::ready(!*cancel.borrow()))
            .map(|candidate| engine.analyze(candidate))
            .buffered(self.concurrency)
            .enumerate()
            .map(|(index, outcome)| {
                progress(index + 1, &outcome);
                outcome
            })
            .collect()
            .await;

        let cancelled = outcomes.len() < candidates.len();
        let mut results = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Analyzed(result) => results.push(*result),
                Outcome::Skipped(skip) => skipped.push(skip),
            }
        }
        rank(&mut results);

        info!(
            candidates = candidates.len(),
            analyzed = results.len(),
            skipped = skipped.len(),
            cancelled,
            "Batch complete"
        );

        BatchReport {
            results,
            skipped,
            cancelled,
            generated_at: Utc::now(),
        }
    }
}
