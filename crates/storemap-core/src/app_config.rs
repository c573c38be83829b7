/// Runtime configuration shared by the CLI and library embedders.
///
/// All fields have defaults; see [`crate::config::load_app_config`] for the
/// environment variables that override them.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the catalog search endpoint.
    pub catalog_base_url: String,
    /// Maximum number of results requested per search.
    pub result_limit: u32,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Viewport span used for zero- and one-point fits, in meters.
    pub default_span_meters: f64,
    /// Proportional padding around a multi-point bounding box.
    pub fit_margin: f64,
}
