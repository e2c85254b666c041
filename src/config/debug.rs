//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so
//! default builds stay quiet.

pub struct DebugFlags {
    /// Emit engine job scheduling and completion summaries.
    pub print_engine_events: bool,
    /// Emit UI interaction logs (tile switches, manual actions).
    pub print_ui_interactions: bool,
    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,
    /// Emit per-component timings of the indicator computation.
    pub print_component_timings: bool,
    /// Emit shutdown messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_engine_events: true,
    print_ui_interactions: false,
    print_state_serde: false,
    print_component_timings: false,
    print_shutdown: false,
};
