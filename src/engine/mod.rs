// Background computation: a single worker thread fed over mpsc channels,
// results promoted to a front buffer the UI reads without locking.
pub mod core;
pub mod messages;
pub mod state;
pub mod worker;

pub use self::core::AnalysisEngine;
