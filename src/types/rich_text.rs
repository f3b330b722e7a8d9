use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notion's inline text as the v3 API encodes it.
///
/// Each run is `[text]` or `[text, annotations]`. Runs are carried through
/// untouched; only the accessors below look inside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Value>);

impl RichText {
    /// Text of the first run, if the first run starts with a string.
    pub fn first_text(&self) -> Option<&str> {
        self.0.first().and_then(run_text)
    }

    /// All run texts concatenated, annotations dropped.
    pub fn plain_text(&self) -> String {
        self.0.iter().filter_map(run_text).collect()
    }
}

fn run_text(run: &Value) -> Option<&str> {
    run.as_array()?.first()?.as_str()
}
