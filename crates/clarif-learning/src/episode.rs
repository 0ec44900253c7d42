//! Episode orchestration: search → evaluate → update until convergence.

use std::sync::Arc;

use chrono::Utc;
use clarif_core::config::{ClarifConfig, CoachKind, EpisodeConfig};
use clarif_core::constants::{REDACTED, TRACE_STATE_DELIMITER};
use clarif_core::errors::{ClarifError, ClarifResult, CoachingError};
use clarif_core::models::{EpisodeReport, EpisodeStatus, Evaluation};
use clarif_core::rules::{Rule, State};
use clarif_core::traits::{ICoach, ITargetPolicy};
use clarif_observability::{episode_span, search_span};
use tracing::{info, warn};
use uuid::Uuid;

use crate::coach::build_coach;
use crate::convergence::ConvergenceTracker;
use crate::learner::Learner;

/// One coaching episode: a start state, an oracle, and the learner/coach pair
/// wired to them.
///
/// Status moves Init → Searching → {Converged, Error}. The terminal states
/// are final: driving a finished episode is an error.
pub struct Episode {
    id: Uuid,
    start: State,
    policy: Arc<dyn ITargetPolicy>,
    learner: Learner,
    coach: Box<dyn ICoach>,
    coach_kind: CoachKind,
    config: EpisodeConfig,
    status: EpisodeStatus,
    steps: usize,
    attempts: usize,
    previous_feedback: Option<Vec<Rule>>,
    /// Visited states of every search attempt, in order.
    visited_log: Vec<Vec<State>>,
    tracker: ConvergenceTracker,
}

impl Episode {
    /// Episode with a fresh learner.
    pub fn new(
        start: State,
        policy: Arc<dyn ITargetPolicy>,
        config: &ClarifConfig,
    ) -> ClarifResult<Self> {
        Self::with_learner(start, policy, Learner::new(), config)
    }

    /// Episode continuing from an existing learner's hypothesis.
    pub fn with_learner(
        start: State,
        policy: Arc<dyn ITargetPolicy>,
        learner: Learner,
        config: &ClarifConfig,
    ) -> ClarifResult<Self> {
        let coach = build_coach(Arc::clone(&policy), &start, &config.coach)?;
        Ok(Self::from_parts(start, policy, learner, coach, config))
    }

    /// Wire an already-built coach to `learner`. Infallible, so a caller
    /// lending out its learner always gets it back through `into_learner`.
    pub(crate) fn from_parts(
        start: State,
        policy: Arc<dyn ITargetPolicy>,
        learner: Learner,
        coach: Box<dyn ICoach>,
        config: &ClarifConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            policy,
            learner,
            coach,
            coach_kind: config.coach.kind,
            config: config.episode.clone(),
            status: EpisodeStatus::Init,
            steps: 0,
            attempts: 0,
            previous_feedback: None,
            visited_log: Vec::new(),
            tracker: ConvergenceTracker::new(),
        }
    }

    /// Run one search/evaluate/update iteration.
    pub fn step(&mut self) -> ClarifResult<EpisodeStatus> {
        if self.status.is_terminal() {
            return Err(ClarifError::EpisodeFinished {
                status: self.status.to_string(),
            });
        }
        self.status = EpisodeStatus::Searching;

        match self.iterate() {
            Ok(status) => {
                self.status = status;
                Ok(status)
            }
            Err(err) => {
                self.status = EpisodeStatus::Error;
                Err(err)
            }
        }
    }

    fn iterate(&mut self) -> ClarifResult<EpisodeStatus> {
        self.attempts += 1;
        let evaluation = {
            let span = search_span!(self.attempts, self.learner.hypothesis().len());
            let _guard = span.enter();
            let policy = Arc::clone(&self.policy);
            let outcome = self.learner.search_path(&self.start, |s| policy.is_goal(s))?;
            self.visited_log.push(self.learner.visited().to_vec());
            self.coach.evaluate_inference(&outcome.traces)?
        };
        self.tracker.update(evaluation.is_correct);

        if evaluation.is_correct {
            info!(steps = self.steps, attempts = self.attempts, "episode converged");
            return Ok(EpisodeStatus::Converged);
        }

        if self.previous_feedback.as_ref() == Some(&evaluation.feedback) {
            warn!(
                steps = self.steps,
                feedback = %evaluation.feedback_str(),
                "coach repeated its feedback"
            );
            return Err(CoachingError::Stagnation {
                steps: self.steps,
                feedback: evaluation.feedback_str(),
            }
            .into());
        }

        let Evaluation { feedback, .. } = evaluation;
        self.learner.update_hypothesis(&feedback);
        self.steps += 1;
        self.previous_feedback = Some(feedback);
        Ok(EpisodeStatus::Searching)
    }

    /// Drive the loop to a terminal status. Returns the report on
    /// convergence and the failure otherwise.
    pub fn run(&mut self) -> ClarifResult<EpisodeReport> {
        let span = episode_span!(self.id, self.coach_kind);
        let _guard = span.enter();
        info!(start = %self.start, "episode started");

        while !self.step()?.is_terminal() {}
        Ok(self.report())
    }

    /// Structured summary. With reduced reporting, the start state and the
    /// hypothesis are replaced by a placeholder.
    pub fn report(&self) -> EpisodeReport {
        let (start_state, learned_hypothesis) = if self.config.full_reporting {
            (self.start.to_string(), self.learner.hypothesis().to_string())
        } else {
            (REDACTED.to_string(), REDACTED.to_string())
        };
        EpisodeReport {
            episode_id: self.id.to_string(),
            start_state,
            learned_hypothesis,
            steps: self.steps,
            status: self.status,
            coach: self.coach_kind,
            traces: self.config.report_traces.then(|| self.traces_str()),
            finished_at: Utc::now(),
        }
    }

    /// Visited states of every search attempt: one attempt per line.
    pub fn traces_str(&self) -> String {
        self.visited_log
            .iter()
            .map(|attempt| {
                attempt
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(TRACE_STATE_DELIMITER)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// Hypothesis updates applied so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Search attempts made so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn learner(&self) -> &Learner {
        &self.learner
    }

    /// Per-attempt correctness history.
    pub fn convergence(&self) -> &ConvergenceTracker {
        &self.tracker
    }

    /// Hand the learner over to the next episode.
    pub fn into_learner(self) -> Learner {
        self.learner
    }
}
