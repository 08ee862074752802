//! Upload controller: validation, UI state transitions and rendering for one
//! classification round trip per submission.
//!
//! The controller never looks up display elements itself. Front-ends inject a
//! [`DisplaySurface`] and the controller drives it through a single [`render`]
//! pass after every transition, so Loading can never be visible together with
//! Results or Error.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::{
    selection::{validate_selection, SelectedFile},
    view::ResultsView,
    ClassifyClient, ClassifyOutcome,
};

pub const AUTO_DISMISS_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Loading,
    Results,
    Error,
}

impl Region {
    /// Hide order used by [`render`]: terminal regions first, then Loading.
    pub const ALL: [Region; 3] = [Region::Results, Region::Error, Region::Loading];
}

/// Handles to the display regions a front-end exposes.
pub trait DisplaySurface {
    fn set_visible(&mut self, region: Region, visible: bool);
    fn set_error_message(&mut self, message: &str);
    fn set_results(&mut self, view: &ResultsView);
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Loading,
    Results(ResultsView),
    Error(String),
}

impl UiState {
    pub fn visible_region(&self) -> Option<Region> {
        match self {
            Self::Idle => None,
            Self::Loading => Some(Region::Loading),
            Self::Results(_) => Some(Region::Results),
            Self::Error(_) => Some(Region::Error),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Results(_) => "results",
            Self::Error(_) => "error",
        }
    }
}

/// Maps a state onto the surface: hide everything else, fill content, then show.
pub fn render<D: DisplaySurface + ?Sized>(display: &mut D, state: &UiState) {
    let target = state.visible_region();
    for region in Region::ALL {
        if Some(region) != target {
            display.set_visible(region, false);
        }
    }

    match state {
        UiState::Results(view) => display.set_results(view),
        UiState::Error(message) => display.set_error_message(message),
        UiState::Idle | UiState::Loading => {}
    }

    if let Some(region) = target {
        display.set_visible(region, true);
    }
}

/// A validated file that has been handed off for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub file: SelectedFile,
}

#[derive(Debug, Clone, Copy)]
struct PendingDismiss {
    generation: u64,
    due: Instant,
}

pub struct UploadController<D> {
    display: D,
    state: UiState,
    generation: u64,
    pending_dismiss: Option<PendingDismiss>,
    auto_dismiss_after: Duration,
    last_submission: u64,
}

impl<D: DisplaySurface> UploadController<D> {
    pub fn new(display: D) -> Self {
        Self::with_auto_dismiss(display, AUTO_DISMISS_DELAY)
    }

    pub fn with_auto_dismiss(mut display: D, auto_dismiss_after: Duration) -> Self {
        let state = UiState::Idle;
        render(&mut display, &state);
        Self {
            display,
            state,
            generation: 0,
            pending_dismiss: None,
            auto_dismiss_after,
            last_submission: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn last_submission(&self) -> u64 {
        self.last_submission
    }

    /// A new file was picked: clear whatever was showing. No request, no validation.
    pub fn on_file_selected(&mut self) {
        debug!(previous = self.state.name(), "file selection changed; resetting view");
        self.transition(UiState::Idle, Instant::now());
    }

    /// Shows a front-end problem (e.g. an unreadable file) in the error region,
    /// with the same auto-dismiss as validation errors.
    pub fn show_error(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        warn!(error = %message, "showing front-end error");
        self.transition(UiState::Error(message), now);
    }

    /// Validates the selection and enters Loading. Returns the submission to
    /// upload, or `None` when validation failed and the error is on screen.
    pub fn begin_submit(
        &mut self,
        selected: Option<SelectedFile>,
        now: Instant,
    ) -> Option<Submission> {
        match validate_selection(selected) {
            Ok(file) => {
                self.last_submission += 1;
                info!(
                    submission = self.last_submission,
                    file_name = %file.file_name,
                    size_bytes = file.bytes.len(),
                    "submitting image for classification"
                );
                self.transition(UiState::Loading, now);
                Some(Submission {
                    id: self.last_submission,
                    file,
                })
            }
            Err(err) => {
                warn!(error = %err, "image selection rejected");
                self.transition(UiState::Error(err.to_string()), now);
                None
            }
        }
    }

    /// Applies the outcome of a submission. Outcomes are applied in arrival
    /// order, so an older submission resolving late overwrites a newer one.
    pub fn finish_submit(&mut self, submission: u64, outcome: ClassifyOutcome, now: Instant) {
        if submission != self.last_submission {
            debug!(
                submission,
                latest = self.last_submission,
                "applying outcome of an earlier submission"
            );
        }

        match outcome {
            ClassifyOutcome::Success(result) => {
                info!(
                    submission,
                    nudity_level = %result.nudity_level,
                    nudity_score = result.nudity_score,
                    "classification succeeded"
                );
                self.transition(UiState::Results(ResultsView::from_result(&result)), now);
            }
            ClassifyOutcome::Failure(err) => {
                warn!(submission, error = %err, "classification failed");
                self.transition(UiState::Error(err.user_message()), now);
            }
        }
    }

    /// Runs a whole submission against `client`; the request is the only await.
    pub async fn submit<C>(&mut self, client: &C, selected: Option<SelectedFile>) -> &UiState
    where
        C: ClassifyClient + ?Sized,
    {
        let Some(submission) = self.begin_submit(selected, Instant::now()) else {
            return &self.state;
        };
        let outcome = client.classify(submission.file).await;
        self.finish_submit(submission.id, outcome, Instant::now());
        &self.state
    }

    /// Hides the error region once its dismissal is due. Returns whether
    /// anything changed; later transitions supersede a pending dismissal.
    pub fn poll_dismiss(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_dismiss else {
            return false;
        };
        if pending.generation != self.generation || now < pending.due {
            return false;
        }

        debug!("auto-dismissing error message");
        self.transition(UiState::Idle, now);
        true
    }

    /// Time left until the pending dismissal, if one is scheduled.
    pub fn dismiss_due_in(&self, now: Instant) -> Option<Duration> {
        self.pending_dismiss
            .filter(|pending| pending.generation == self.generation)
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    fn transition(&mut self, next: UiState, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        self.pending_dismiss = match &next {
            UiState::Error(_) => Some(PendingDismiss {
                generation: self.generation,
                due: now + self.auto_dismiss_after,
            }),
            _ => None,
        };
        self.state = next;
        render(&mut self.display, &self.state);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
