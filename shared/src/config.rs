use serde::{Deserialize, Serialize};

/// Tunables shared by every widget on a page.
///
/// A page can override any subset of these by embedding a JSON object;
/// missing fields fall back to [`WidgetConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WidgetConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base_url: String,
    /// How long a toast stays visible
    pub toast_duration_ms: u32,
    /// Fade-out time of a removed schedule entry
    pub fade_out_ms: u32,
    /// Delay before a freshly added entry is scrolled into view
    pub scroll_delay_ms: u32,
    /// Delay between a department click and re-filtering the table
    pub filter_delay_ms: u32,
    /// Vertical gap between a holiday cell and its tooltip
    pub tooltip_offset_px: f64,
    pub csrf_cookie_name: String,
    pub csrf_header_name: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            toast_duration_ms: 3000,
            fade_out_ms: 300,
            scroll_delay_ms: 100,
            filter_delay_ms: 50,
            tooltip_offset_px: 10.0,
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
        }
    }
}

impl WidgetConfig {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
