use std::sync::Arc;
use std::time::Instant;

use crate::models::results::IndicatorOutputs;

/// State of the one assessment the engine manages.
#[derive(Clone)]
pub struct RunState {
    /// THE FRONT BUFFER.
    /// The UI reads this every frame; a finished run replaces the Arc
    /// pointer instead of mutating anything in place.
    pub outputs: Option<Arc<IndicatorOutputs>>,

    /// Is the worker currently crunching?
    pub is_computing: bool,

    pub last_update_time: Instant,

    /// Last error to show in the status bar.
    pub last_error: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            outputs: None,
            is_computing: false,
            last_update_time: Instant::now(),
            last_error: None,
        }
    }

    /// Promote a finished result to the front buffer.
    pub fn update_buffer(&mut self, new_outputs: Arc<IndicatorOutputs>) {
        self.outputs = Some(new_outputs);
        self.is_computing = false;
        self.last_update_time = Instant::now();
        self.last_error = None;
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}
