//! Batch execution: independent episodes in parallel, or a sequence of
//! episodes sharing one learner.

use std::mem;
use std::sync::Arc;

use clarif_core::config::ClarifConfig;
use clarif_core::errors::{ClarifResult, CoachingError};
use clarif_core::models::EpisodeReport;
use clarif_core::rules::State;
use clarif_core::traits::ITargetPolicy;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::coach::build_coach;
use crate::convergence::ConvergenceTracker;
use crate::episode::Episode;
use crate::learner::Learner;

/// One independent episode to run.
#[derive(Clone)]
pub struct EpisodeJob {
    pub start: State,
    pub policy: Arc<dyn ITargetPolicy>,
}

impl EpisodeJob {
    pub fn new(start: State, policy: Arc<dyn ITargetPolicy>) -> Self {
        Self { start, policy }
    }
}

/// Outcome of a memory-mode run.
pub struct MemoryRun {
    pub reports: Vec<EpisodeReport>,
    /// Number of episodes after which the tracker first reported convergence.
    pub converged_after: Option<usize>,
}

/// Drive `episode` to a terminal status, failing once it has taken
/// `max_steps` hypothesis updates without finishing.
pub fn run_capped(episode: &mut Episode, max_steps: usize) -> ClarifResult<EpisodeReport> {
    loop {
        if episode.step()?.is_terminal() {
            return Ok(episode.report());
        }
        if episode.steps() >= max_steps {
            return Err(CoachingError::StepLimitExceeded { limit: max_steps }.into());
        }
    }
}

/// Run independent episodes across the rayon pool. Each job gets its own
/// learner and coach; results come back in job order and one failure does
/// not affect the others.
pub fn run_parallel(jobs: &[EpisodeJob], config: &ClarifConfig) -> Vec<ClarifResult<EpisodeReport>> {
    let max_steps = config.batch.max_steps;
    let results: Vec<ClarifResult<EpisodeReport>> = jobs
        .par_iter()
        .map(|job| {
            let mut episode = Episode::new(job.start.clone(), Arc::clone(&job.policy), config)?;
            run_capped(&mut episode, max_steps)
        })
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        warn!(jobs = jobs.len(), failed, "batch finished with failures");
    } else {
        info!(jobs = jobs.len(), "batch finished");
    }
    results
}

/// Run episodes one after another, carrying the learner's hypothesis from
/// each episode into the next. An episode that converges in zero steps counts
/// as a success for the convergence tracker.
///
/// `learner` is updated in place. When an episode fails, the error is
/// returned and `learner` keeps everything learned up to and including the
/// failed episode.
pub fn run_with_memory(
    starts: &[State],
    policy: Arc<dyn ITargetPolicy>,
    learner: &mut Learner,
    config: &ClarifConfig,
) -> ClarifResult<MemoryRun> {
    let batch = &config.batch;
    let mut tracker = ConvergenceTracker::new();
    let mut reports = Vec::with_capacity(starts.len());
    let mut converged_after = None;

    for (index, start) in starts.iter().enumerate() {
        let coach = build_coach(Arc::clone(&policy), start, &config.coach)?;
        let mut episode = Episode::from_parts(
            start.clone(),
            Arc::clone(&policy),
            mem::take(learner),
            coach,
            config,
        );
        let outcome = run_capped(&mut episode, batch.max_steps);
        *learner = episode.into_learner();
        let report = outcome.map_err(|err| {
            warn!(episode = index, error = %err, "memory run stopped");
            err
        })?;

        tracker.update(report.steps == 0);
        reports.push(report);

        if converged_after.is_none()
            && tracker.is_converged(batch.convergence_threshold, batch.convergence_window)
        {
            converged_after = Some(index + 1);
            info!(
                episodes = index + 1,
                hypothesis_size = learner.hypothesis().len(),
                "learner no longer needs coaching"
            );
            if batch.stop_when_converged {
                break;
            }
        }
    }

    Ok(MemoryRun {
        reports,
        converged_after,
    })
}
