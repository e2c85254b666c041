//! Analysis and computation configuration

/// Settings for the productivity trajectory component
pub struct TrajectorySettings {
    // Two-sided confidence level for the Mann-Kendall significance test.
    // 0.95 corresponds to the familiar |z| > 1.96 cut.
    pub confidence: f64,
    // Minimum number of annual observations for a meaningful trend
    pub min_years: usize,
}

/// Settings for the productivity state component
pub struct StateSettings {
    // Mean VI differences at or below this are treated as no change
    // (the VI is unit-scaled, so 0.01 is 1% of the index range)
    pub epsilon: f64,
    // Fraction added below/above the baseline min/max before taking deciles
    pub extension: f64,
}

/// Settings for the productivity performance component
pub struct PerformanceSettings {
    // Observed mean VI over the unit 90th percentile at or below this
    // ratio marks the pixel degraded
    pub degraded_ratio: f64,
}

/// Settings for the soil organic carbon component
pub struct SocSettings {
    // Percent SOC change beyond which a pixel is improved / degraded
    pub pct_change_threshold: f64,
    // Years for a land-use transition to reach the new SOC equilibrium
    pub equilibrium_years: f64,
}

/// The master analysis configuration
pub struct AnalysisConfig {
    // Observations with VI at or below this are zeroed before integration
    pub vi_threshold: f64,

    // Sub-groups
    pub trajectory: TrajectorySettings,
    pub state: StateSettings,
    pub performance: PerformanceSettings,
    pub soc: SocSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    vi_threshold: 0.0,

    trajectory: TrajectorySettings {
        confidence: 0.95,
        min_years: 5,
    },

    state: StateSettings {
        epsilon: 0.01,
        extension: 0.05,
    },

    performance: PerformanceSettings {
        degraded_ratio: 0.5,
    },

    soc: SocSettings {
        pct_change_threshold: 10.0,
        equilibrium_years: 20.0,
    },
};
