use crate::config::{ConfigError, ExperimentConfig};
use crate::schedule::generate_schedule;
use grapex_core::{ResponseRecord, RunState, StimulusResult, Surface, Trial};
use grapex_render::stimulus::renderer_for;
use grapex_render::StimulusError;
use grapex_timing::Clock;
use rand::RngCore;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("run already started")]
    AlreadyStarted,

    #[error("no trial awaiting presentation")]
    NothingToPresent,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stimulus(#[from] StimulusError),
}

/// What a "response submitted" signal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Response recorded, next trial presented.
    Recorded,
    /// Response recorded, run complete.
    Finished,
    /// Signal arrived outside `AwaitingResponse` and was dropped.
    Ignored,
    /// Non-finite slider value; nothing recorded, same trial still open.
    Resubmit,
}

/// Trial-execution state machine. Owns the schedule, the cursor, the
/// result store and the run's randomness and clock; advances only on the
/// discrete external signals `start` and `submit_response`.
pub struct TrialRunner<C: Clock, R: RngCore> {
    config: ExperimentConfig,
    schedule: Vec<Trial>,
    cursor: usize,
    state: RunState,
    presented_at: Option<C::Timestamp>,
    results: Vec<ResponseRecord>,
    stimulus_log: Vec<StimulusResult>,
    clock: C,
    rng: R,
}

impl<C: Clock, R: RngCore> TrialRunner<C, R> {
    pub fn new(config: ExperimentConfig, clock: C, rng: R) -> Self {
        Self {
            config,
            schedule: Vec::new(),
            cursor: 0,
            state: RunState::Idle,
            presented_at: None,
            results: Vec::new(),
            stimulus_log: Vec::new(),
            clock,
            rng,
        }
    }

    /// Build the schedule (validating the configuration) and present the
    /// first trial. The schedule is immutable for the rest of the run.
    pub fn start(&mut self, surface: &mut dyn Surface) -> Result<(), RunnerError> {
        if self.state != RunState::Idle {
            return Err(RunnerError::AlreadyStarted);
        }
        self.schedule = generate_schedule(&self.config, &mut self.rng)?;
        self.state = RunState::Presenting;
        self.present(surface)
    }

    /// Draw the pending trial's stimulus and open the response window.
    ///
    /// On a rendering failure the runner stays in `Presenting` with the
    /// cursor untouched, so the same trial can be presented again.
    pub fn present(&mut self, surface: &mut dyn Surface) -> Result<(), RunnerError> {
        if self.state != RunState::Presenting {
            return Err(RunnerError::NothingToPresent);
        }
        let trial = self.schedule[self.cursor];
        surface.clear();
        let side = renderer_for(trial.encoding).render(surface, trial.ground_truth, &mut self.rng)?;
        self.stimulus_log.push(side);
        self.presented_at = Some(self.clock.now());
        self.state = RunState::AwaitingResponse;
        tracing::debug!(
            trial = self.cursor + 1,
            encoding = %trial.encoding,
            ratio = trial.ground_truth,
            "stimulus presented"
        );
        Ok(())
    }

    /// Handle the external "response submitted" signal carrying the
    /// current slider value.
    ///
    /// Signals outside `AwaitingResponse` (double submissions, clicks
    /// before start) are dropped, keeping at most one record per trial.
    /// A rendering failure while presenting the *next* trial keeps the
    /// just-recorded response and leaves the runner retryable via
    /// [`TrialRunner::present`].
    pub fn submit_response(
        &mut self,
        surface: &mut dyn Surface,
        value: f64,
    ) -> Result<SubmitOutcome, RunnerError> {
        if self.state != RunState::AwaitingResponse {
            tracing::debug!(state = ?self.state, "response signal ignored");
            return Ok(SubmitOutcome::Ignored);
        }
        if !value.is_finite() {
            tracing::warn!("non-finite slider value rejected, awaiting resubmission");
            return Ok(SubmitOutcome::Resubmit);
        }

        let elapsed = self
            .presented_at
            .map(|t| self.clock.elapsed(t))
            .unwrap_or_default();
        let trial = self.schedule[self.cursor];
        self.results.push(ResponseRecord {
            encoding: trial.encoding,
            trial: self.cursor + 1,
            ground_truth: trial.ground_truth,
            response: value.clamp(0.0, 100.0),
            response_time_ms: elapsed.as_millis() as u64,
        });
        self.presented_at = None;
        self.cursor += 1;

        if self.cursor < self.schedule.len() {
            self.state = RunState::Presenting;
            self.present(surface)?;
            Ok(SubmitOutcome::Recorded)
        } else {
            self.state = RunState::Finished;
            tracing::info!(trials = self.results.len(), "run finished");
            Ok(SubmitOutcome::Finished)
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == RunState::Finished
    }

    pub fn schedule(&self) -> &[Trial] {
        &self.schedule
    }

    /// The trial currently presented or pending presentation.
    pub fn current_trial(&self) -> Option<&Trial> {
        match self.state {
            RunState::Presenting | RunState::AwaitingResponse => self.schedule.get(self.cursor),
            _ => None,
        }
    }

    /// (1-based current trial, total) while a trial is active.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.current_trial()
            .map(|_| (self.cursor + 1, self.schedule.len()))
    }

    pub fn results(&self) -> &[ResponseRecord] {
        &self.results
    }

    /// Per-presentation record of which slot held the reference, for
    /// side-bias auditing.
    pub fn stimulus_log(&self) -> &[StimulusResult] {
        &self.stimulus_log
    }

    pub fn into_results(self) -> Vec<ResponseRecord> {
        self.results
    }
}
