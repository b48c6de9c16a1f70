use serde::Deserialize;
use web_sys::window;

/// Id of the optional `<script type="application/json">` block in index.html.
pub const CONFIG_ELEMENT_ID: &str = "board-config";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for every API path. Empty means same origin.
    pub api_base: String,
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the host page's config block, falling back to defaults.
    pub fn load() -> Self {
        let Some(json) = config_json_from_dom() else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed #{CONFIG_ELEMENT_ID}");
                Self::default()
            }
        }
    }
}

fn config_json_from_dom() -> Option<String> {
    let doc = window()?.document()?;
    let el = doc.get_element_by_id(CONFIG_ELEMENT_ID)?;
    el.text_content()
}
