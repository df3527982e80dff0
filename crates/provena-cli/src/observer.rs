//! Console progress reporting for registration runs.

use provena_registry::{ProgressObserver, RegistrationStage};

/// Prints each stage of a registration run as it starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl ProgressObserver for ConsoleObserver {
    fn stage_started(&self, step: u8, stage: RegistrationStage) {
        println!("[{step}/5] {stage}");
    }

    fn flow_completed(&self) {
        println!("registration complete");
    }

    fn flow_failed(&self, message: &str) {
        eprintln!("registration failed: {message}");
    }
}
