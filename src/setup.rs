//! First-run setup: secure the workspace with a recovery phrase, or try the
//! board out in evaluation mode.

use crate::{
    crypto::RecoveryPhrase,
    error::{ChathamError, Result},
};
use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step of the setup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupStep {
    Choose,
    Create,
    Import,
    Evaluate,
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Choose => write!(f, "choose"),
            Self::Create => write!(f, "create"),
            Self::Import => write!(f, "import"),
            Self::Evaluate => write!(f, "evaluate"),
        }
    }
}

/// How setup finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// The user holds a recovery phrase
    Secured(RecoveryPhrase),
    /// Data is temporary and subject to [`EvaluationPolicy`]
    Evaluation,
}

/// Limits of evaluation mode, whichever is hit first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPolicy {
    pub max_hours: i64,
    pub max_cards: usize,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            max_hours: 24,
            max_cards: 10,
        }
    }
}

impl EvaluationPolicy {
    /// Checks whether an evaluation started at `started_at` has run out.
    ///
    /// An hour limit too large to represent as a date never expires.
    pub fn is_expired(
        &self,
        started_at: DateTime<Utc>,
        cards_created: usize,
        now: DateTime<Utc>,
    ) -> bool {
        cards_created >= self.max_cards || self.deadline(started_at).is_some_and(|end| now >= end)
    }

    /// The moment the time limit runs out, if it is representable
    pub fn deadline(&self, started_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        Duration::try_hours(self.max_hours).and_then(|limit| started_at.checked_add_signed(limit))
    }

    /// Cards that can still be created before expiry
    pub fn remaining_cards(&self, cards_created: usize) -> usize {
        self.max_cards.saturating_sub(cards_created)
    }
}

/// State machine behind the setup screens
#[derive(Debug, Clone)]
pub struct SetupFlow {
    step: SetupStep,
    pending_phrase: Option<RecoveryPhrase>,
}

impl Default for SetupFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SetupFlow {
    pub fn new() -> Self {
        Self {
            step: SetupStep::Choose,
            pending_phrase: None,
        }
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    /// The phrase to show while in [`SetupStep::Create`]
    pub fn pending_phrase(&self) -> Option<&RecoveryPhrase> {
        self.pending_phrase.as_ref()
    }

    /// Generates a new phrase for the user to write down
    pub fn create_new(&mut self) -> Result<&RecoveryPhrase> {
        self.expect_step(SetupStep::Choose, "create a new phrase")?;
        let phrase = RecoveryPhrase::generate()?;
        self.step = SetupStep::Create;
        Ok(self.pending_phrase.insert(phrase))
    }

    /// Finishes setup once the generated phrase has been written down
    pub fn confirm_written_down(&mut self) -> Result<SetupOutcome> {
        self.expect_step(SetupStep::Create, "confirm the phrase")?;
        let phrase = self
            .pending_phrase
            .take()
            .ok_or(ChathamError::InvalidRecoveryPhrase)?;
        info!("event=setup_complete module=setup mode=created");
        Ok(SetupOutcome::Secured(phrase))
    }

    pub fn start_import(&mut self) -> Result<()> {
        self.expect_step(SetupStep::Choose, "import a phrase")?;
        self.step = SetupStep::Import;
        Ok(())
    }

    /// Finishes setup with an existing phrase. An invalid phrase leaves the
    /// flow on the import step.
    pub fn import(&mut self, phrase: &str) -> Result<SetupOutcome> {
        self.expect_step(SetupStep::Import, "import a phrase")?;
        let phrase = RecoveryPhrase::parse(phrase)?;
        info!("event=setup_complete module=setup mode=imported");
        Ok(SetupOutcome::Secured(phrase))
    }

    /// Asks for evaluation mode; the caller shows the policy warning
    pub fn skip_for_now(&mut self) -> Result<()> {
        self.expect_step(SetupStep::Choose, "skip setup")?;
        self.step = SetupStep::Evaluate;
        Ok(())
    }

    pub fn cancel_evaluation(&mut self) -> Result<()> {
        self.expect_step(SetupStep::Evaluate, "cancel evaluation")?;
        self.step = SetupStep::Choose;
        Ok(())
    }

    pub fn confirm_evaluation(&mut self) -> Result<SetupOutcome> {
        self.expect_step(SetupStep::Evaluate, "start evaluation")?;
        info!("event=setup_complete module=setup mode=evaluation");
        Ok(SetupOutcome::Evaluation)
    }

    /// Returns to the initial choice from the create or import step
    pub fn back(&mut self) -> Result<()> {
        if !matches!(self.step, SetupStep::Create | SetupStep::Import) {
            return Err(ChathamError::InvalidSetupTransition {
                from: self.step.to_string(),
                action: "go back".to_string(),
            });
        }
        self.step = SetupStep::Choose;
        self.pending_phrase = None;
        Ok(())
    }

    fn expect_step(&self, expected: SetupStep, action: &str) -> Result<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(ChathamError::InvalidSetupTransition {
                from: self.step.to_string(),
                action: action.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_flow() {
        let mut flow = SetupFlow::new();
        assert_eq!(flow.step(), SetupStep::Choose);

        let shown = flow.create_new().unwrap().to_string();
        assert_eq!(flow.step(), SetupStep::Create);
        assert_eq!(shown.split(' ').count(), 24);

        match flow.confirm_written_down().unwrap() {
            SetupOutcome::Secured(phrase) => assert_eq!(phrase.to_string(), shown),
            SetupOutcome::Evaluation => panic!("expected a secured outcome"),
        }
    }

    #[test]
    fn test_import_flow() {
        let phrase = RecoveryPhrase::generate().unwrap().to_string();
        let mut flow = SetupFlow::new();

        flow.start_import().unwrap();
        assert!(matches!(
            flow.import("abandon abandon abandon"),
            Err(ChathamError::InvalidRecoveryPhrase)
        ));
        assert_eq!(flow.step(), SetupStep::Import);

        let outcome = flow.import(&phrase).unwrap();
        assert!(matches!(outcome, SetupOutcome::Secured(p) if p.to_string() == phrase));
    }

    #[test]
    fn test_evaluation_flow() {
        let mut flow = SetupFlow::new();

        flow.skip_for_now().unwrap();
        assert_eq!(flow.step(), SetupStep::Evaluate);

        flow.cancel_evaluation().unwrap();
        assert_eq!(flow.step(), SetupStep::Choose);

        flow.skip_for_now().unwrap();
        assert_eq!(flow.confirm_evaluation().unwrap(), SetupOutcome::Evaluation);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = SetupFlow::new();

        let err = flow.confirm_written_down().unwrap_err();
        assert!(matches!(
            err,
            ChathamError::InvalidSetupTransition { ref from, .. } if from == "choose"
        ));
        assert!(flow.import("anything").is_err());
        assert!(flow.confirm_evaluation().is_err());

        flow.create_new().unwrap();
        assert!(flow.skip_for_now().is_err());

        flow.back().unwrap();
        assert_eq!(flow.step(), SetupStep::Choose);
        assert!(flow.pending_phrase().is_none());
    }

    #[test]
    fn test_back_only_from_create_or_import() {
        let mut flow = SetupFlow::new();
        assert!(flow.back().is_err());

        flow.start_import().unwrap();
        flow.back().unwrap();
        assert_eq!(flow.step(), SetupStep::Choose);

        flow.skip_for_now().unwrap();
        assert!(matches!(
            flow.back(),
            Err(ChathamError::InvalidSetupTransition { ref from, .. }) if from == "evaluate"
        ));
        assert_eq!(flow.step(), SetupStep::Evaluate);
    }

    #[test]
    fn test_huge_hour_limit_never_expires_by_time() {
        let policy: EvaluationPolicy =
            serde_json::from_str(r#"{"maxHours": 9223372036854775807, "maxCards": 10}"#).unwrap();
        let now = Utc::now();

        assert!(policy.deadline(now).is_none());
        assert!(!policy.is_expired(now, 0, now));
        assert!(!policy.is_expired(now, 0, now + Duration::days(3650)));
        assert!(policy.is_expired(now, 10, now));
    }

    #[test]
    fn test_deadline_is_start_plus_limit() {
        let policy = EvaluationPolicy::default();
        let start = Utc::now();

        assert_eq!(policy.deadline(start), Some(start + Duration::hours(24)));
    }

    #[test]
    fn test_evaluation_expires_after_24_hours() {
        let policy = EvaluationPolicy::default();
        let start = Utc::now();

        assert!(!policy.is_expired(start, 0, start + Duration::hours(23)));
        assert!(policy.is_expired(start, 0, start + Duration::hours(24)));
    }

    #[test]
    fn test_evaluation_expires_after_10_cards() {
        let policy = EvaluationPolicy::default();
        let start = Utc::now();

        assert!(!policy.is_expired(start, 9, start));
        assert!(policy.is_expired(start, 10, start));
        assert_eq!(policy.remaining_cards(7), 3);
        assert_eq!(policy.remaining_cards(12), 0);
    }
}
