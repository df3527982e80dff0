//! # Registration Flow State Machine
//!
//! Models one registration run as an explicit finite-state machine:
//!
//! ```text
//! Idle ──▶ Stage1 ──▶ Stage2 ──▶ Stage3 ──▶ Stage4 ──▶ Stage5 ──▶ Done
//!            │           │          │          │          │
//!            └───────────┴──────────┴──────────┴──────────┴──▶ Failed (terminal)
//! ```
//!
//! Stages are ordered and non-skippable; the step index is strictly
//! monotonic. Transitions are driven only by completed I/O, never by
//! timers, and the machine is independent of any rendering concern.
//! UI observers receive each stage start through [`ProgressObserver`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use provena_core::Timestamp;

// ─── Stages ──────────────────────────────────────────────────────────

/// The five ordered stages of a registration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationStage {
    /// Produce the knowledge artifact and upload it to storage.
    KnowledgeUpload,
    /// Assemble the off-chain metadata documents.
    AssembleDocuments,
    /// Hash and upload both metadata documents.
    HashAndPin,
    /// Submit the ledger registration transaction.
    SubmitTransaction,
    /// Persist the result to the off-chain index.
    PersistIndex,
}

impl RegistrationStage {
    /// All stages in execution order.
    pub const ALL: [Self; 5] = [
        Self::KnowledgeUpload,
        Self::AssembleDocuments,
        Self::HashAndPin,
        Self::SubmitTransaction,
        Self::PersistIndex,
    ];

    /// One-based step index of this stage.
    pub fn step_index(&self) -> u8 {
        match self {
            Self::KnowledgeUpload => 1,
            Self::AssembleDocuments => 2,
            Self::HashAndPin => 3,
            Self::SubmitTransaction => 4,
            Self::PersistIndex => 5,
        }
    }
}

impl std::fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::KnowledgeUpload => "KNOWLEDGE_UPLOAD",
            Self::AssembleDocuments => "ASSEMBLE_DOCUMENTS",
            Self::HashAndPin => "HASH_AND_PIN",
            Self::SubmitTransaction => "SUBMIT_TRANSACTION",
            Self::PersistIndex => "PERSIST_INDEX",
        };
        f.write_str(s)
    }
}

// ─── Flow state ──────────────────────────────────────────────────────

/// Where a registration run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowState {
    /// No stage has completed yet.
    Idle,
    /// The given stage has completed.
    Completed(RegistrationStage),
    /// All stages completed.
    Done,
    /// The run failed (terminal).
    Failed,
}

/// Errors from flow transitions.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A stage was completed out of order.
    #[error("stage {stage} completed out of order: expected step {expected}, got {got}")]
    OutOfOrder {
        /// The stage that was reported.
        stage: RegistrationStage,
        /// The step index the machine expected next.
        expected: u8,
        /// The step index that was reported.
        got: u8,
    },

    /// The flow is already in a terminal state.
    #[error("flow is terminal ({state:?}), no further transitions allowed")]
    Terminal {
        /// The terminal state.
        state: FlowState,
    },
}

/// Record of one completed flow transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowTransitionRecord {
    /// State before the transition.
    pub from: FlowState,
    /// State after the transition.
    pub to: FlowState,
    /// When the transition was recorded.
    pub timestamp: Timestamp,
}

/// One registration run's state machine with its transition log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationFlow {
    state: FlowState,
    transitions: Vec<FlowTransitionRecord>,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationFlow {
    /// A fresh run in `Idle`.
    pub fn new() -> Self {
        Self {
            state: FlowState::Idle,
            transitions: Vec::new(),
        }
    }

    /// The current state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The step index of the last completed stage (0 while idle).
    pub fn completed_steps(&self) -> u8 {
        match self.state {
            FlowState::Idle => 0,
            FlowState::Completed(stage) => stage.step_index(),
            FlowState::Done => RegistrationStage::ALL.len() as u8,
            FlowState::Failed => self
                .transitions
                .iter()
                .rev()
                .find_map(|t| match t.from {
                    FlowState::Completed(stage) => Some(stage.step_index()),
                    _ => None,
                })
                .unwrap_or(0),
        }
    }

    /// Whether the run reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, FlowState::Done | FlowState::Failed)
    }

    /// The ordered transition log.
    pub fn transitions(&self) -> &[FlowTransitionRecord] {
        &self.transitions
    }

    /// Record that `stage` completed its I/O.
    ///
    /// Stages must complete strictly in order; skipping or repeating a
    /// step is rejected.
    pub fn advance(&mut self, stage: RegistrationStage) -> Result<(), FlowError> {
        if self.is_terminal() {
            return Err(FlowError::Terminal { state: self.state });
        }
        let expected = self.completed_steps() + 1;
        let got = stage.step_index();
        if got != expected {
            return Err(FlowError::OutOfOrder {
                stage,
                expected,
                got,
            });
        }
        self.do_transition(FlowState::Completed(stage));
        Ok(())
    }

    /// Mark the run done. Valid only after the final stage completed.
    pub fn complete(&mut self) -> Result<(), FlowError> {
        if self.is_terminal() {
            return Err(FlowError::Terminal { state: self.state });
        }
        let last = RegistrationStage::PersistIndex;
        if self.state != FlowState::Completed(last) {
            return Err(FlowError::OutOfOrder {
                stage: last,
                expected: last.step_index(),
                got: self.completed_steps(),
            });
        }
        self.do_transition(FlowState::Done);
        Ok(())
    }

    /// Mark the run failed. Valid from any non-terminal state.
    pub fn fail(&mut self) {
        if !self.is_terminal() {
            self.do_transition(FlowState::Failed);
        }
    }

    fn do_transition(&mut self, to: FlowState) {
        self.transitions.push(FlowTransitionRecord {
            from: self.state,
            to,
            timestamp: Timestamp::now(),
        });
        self.state = to;
    }
}

// ─── Observer ────────────────────────────────────────────────────────

/// Observer hook for UI progress display.
///
/// The orchestrator reports each stage start with its monotonically
/// increasing step index, then completion or failure once. All methods
/// default to no-ops.
pub trait ProgressObserver: Send + Sync {
    /// A stage is starting its I/O.
    fn stage_started(&self, step: u8, stage: RegistrationStage) {
        let _ = (step, stage);
    }

    /// The run completed successfully.
    fn flow_completed(&self) {}

    /// The run failed with the given message.
    fn flow_failed(&self, message: &str) {
        let _ = message;
    }
}

/// Observer that ignores all progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flow_is_idle() {
        let flow = RegistrationFlow::new();
        assert_eq!(flow.state(), FlowState::Idle);
        assert_eq!(flow.completed_steps(), 0);
        assert!(!flow.is_terminal());
    }

    #[test]
    fn full_run_in_order() {
        let mut flow = RegistrationFlow::new();
        for stage in RegistrationStage::ALL {
            flow.advance(stage).unwrap();
            assert_eq!(flow.completed_steps(), stage.step_index());
        }
        flow.complete().unwrap();
        assert_eq!(flow.state(), FlowState::Done);
        assert_eq!(flow.completed_steps(), 5);
        assert_eq!(flow.transitions().len(), 6);
    }

    #[test]
    fn step_indices_are_monotonic_in_log() {
        let mut flow = RegistrationFlow::new();
        for stage in RegistrationStage::ALL {
            flow.advance(stage).unwrap();
        }
        let steps: Vec<u8> = flow
            .transitions()
            .iter()
            .filter_map(|t| match t.to {
                FlowState::Completed(stage) => Some(stage.step_index()),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn cannot_skip_a_stage() {
        let mut flow = RegistrationFlow::new();
        flow.advance(RegistrationStage::KnowledgeUpload).unwrap();
        let err = flow.advance(RegistrationStage::HashAndPin).unwrap_err();
        assert!(matches!(err, FlowError::OutOfOrder { expected: 2, got: 3, .. }));
    }

    #[test]
    fn cannot_repeat_a_stage() {
        let mut flow = RegistrationFlow::new();
        flow.advance(RegistrationStage::KnowledgeUpload).unwrap();
        assert!(flow.advance(RegistrationStage::KnowledgeUpload).is_err());
    }

    #[test]
    fn cannot_complete_early() {
        let mut flow = RegistrationFlow::new();
        flow.advance(RegistrationStage::KnowledgeUpload).unwrap();
        assert!(flow.complete().is_err());
    }

    #[test]
    fn fail_is_terminal_from_any_stage() {
        let mut flow = RegistrationFlow::new();
        flow.advance(RegistrationStage::KnowledgeUpload).unwrap();
        flow.advance(RegistrationStage::AssembleDocuments).unwrap();
        flow.fail();
        assert_eq!(flow.state(), FlowState::Failed);
        assert!(flow.is_terminal());
        assert!(flow.advance(RegistrationStage::HashAndPin).is_err());
        // Failed flow still reports how far it got.
        assert_eq!(flow.completed_steps(), 2);
    }

    #[test]
    fn fail_on_terminal_is_a_noop() {
        let mut flow = RegistrationFlow::new();
        flow.fail();
        let count = flow.transitions().len();
        flow.fail();
        assert_eq!(flow.transitions().len(), count);
    }

    #[test]
    fn stage_display_names() {
        assert_eq!(
            RegistrationStage::KnowledgeUpload.to_string(),
            "KNOWLEDGE_UPLOAD"
        );
        assert_eq!(
            RegistrationStage::PersistIndex.to_string(),
            "PERSIST_INDEX"
        );
    }
}
