/// Every user-facing string in one place.
pub struct UiText {
    pub app_title: &'static str,

    pub aoi_heading: &'static str,
    pub aoi_method_heading: &'static str,
    pub aoi_points_heading: &'static str,
    pub aoi_add_point: &'static str,
    pub aoi_clear: &'static str,
    pub aoi_empty_hint: &'static str,
    pub aoi_disabled_method_hint: &'static str,

    pub input_heading: &'static str,
    pub input_sensors_heading: &'static str,
    pub input_index_heading: &'static str,
    pub input_trajectory_heading: &'static str,
    pub input_periods_heading: &'static str,
    pub input_threshold_helper: &'static str,
    pub input_run: &'static str,
    pub input_aoi_missing: &'static str,

    pub result_heading: &'static str,
    pub result_empty: &'static str,
    pub result_map_heading: &'static str,
    pub result_summary_heading: &'static str,
    pub result_transitions_heading: &'static str,
    pub result_export: &'static str,

    pub reclassify_heading: &'static str,
    pub reclassify_matrix_heading: &'static str,
    pub reclassify_map_heading: &'static str,
    pub reclassify_reset: &'static str,
    pub reclassify_matrix_helper: &'static str,

    pub about_heading: &'static str,
    pub about_body: &'static str,
    pub about_disclaimer: &'static str,
}

pub static UI_TEXT: UiText = UiText {
    app_title: "Land Degradation Dashboard",

    aoi_heading: "Area of interest",
    aoi_method_heading: "Selection method",
    aoi_points_heading: "Buffered points",
    aoi_add_point: "Add point",
    aoi_clear: "Clear all",
    aoi_empty_hint: "Add at least one point to define the assessment area.",
    aoi_disabled_method_hint: "Not available in this build",

    input_heading: "Assessment parameters",
    input_sensors_heading: "Sensors",
    input_index_heading: "Vegetation index",
    input_trajectory_heading: "Trajectory method",
    input_periods_heading: "Periods",
    input_threshold_helper: "Observations at or below the threshold are zeroed before averaging",
    input_run: "Compute indicators",
    input_aoi_missing: "Define an area of interest first",

    result_heading: "Results",
    result_empty: "No results yet. Configure the parameters and run the assessment.",
    result_map_heading: "Map",
    result_summary_heading: "Degradation summary",
    result_transitions_heading: "Land cover transitions",
    result_export: "Export summary (JSON)",

    reclassify_heading: "Land cover adaptation",
    reclassify_matrix_heading: "Transition significance matrix",
    reclassify_map_heading: "Class aggregation",
    reclassify_reset: "Reset to defaults",
    reclassify_matrix_helper:
        "Rows are the baseline class, columns the target. - degradation, 0 neutral, + improvement",

    about_heading: "About",
    about_body: "Computes the SDG indicator 15.3.1 (proportion of land that is degraded \
over total land area) from an analysis-ready data bundle. The indicator combines three \
sub-indicators over an area of interest: land productivity (trend, state and performance \
of the vegetation index), land cover transitions, and soil organic carbon stocks. \
Sub-indicators are combined pixel by pixel following the one-out-all-out rule of the \
UNCCD Good Practice Guidance.",
    about_disclaimer: "Results depend on the quality and resolution of the input data \
bundle and on the chosen parameters. They are produced for exploration and reporting \
support, not as a legal determination of land status.",
};
