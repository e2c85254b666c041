use std::sync::Arc;

use crate::data::bundle::DataBundle;
use crate::models::JobParams;
use crate::models::results::IndicatorOutputs;

/// A request to run the full assessment with one parameter snapshot.
#[derive(Clone)]
pub struct JobRequest {
    pub params: JobParams,
    // Immutable data, shared with the UI thread
    pub bundle: Arc<DataBundle>,
}

/// What the worker sends back.
pub struct JobResult {
    pub duration_ms: u128,

    // Success: the new front buffer
    // Failure: the error chain as a string
    pub result: Result<Arc<IndicatorOutputs>, String>,
}
