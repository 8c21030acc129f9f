//! Configuration for treelens
//!
//! Render options can come from a configuration file as well as from the
//! command line. Files are discovered by walking up from the working
//! directory; the first match wins:
//!
//! 1. `.treelensrc.json`
//! 2. `.treelensrc.toml`
//! 3. `treelens.yaml`
//! 4. `treelens.yml`
//!
//! Every field is optional; absent fields keep their defaults.
//!
//! ## Example Configuration
//!
//! ```json
//! {
//!   "fold": true,
//!   "showMissingTokens": false,
//!   "tabWidth": 4,
//!   "pretty": true
//! }
//! ```

mod loader;

use serde::{Deserialize, Serialize};

use crate::explorer::DEFAULT_TAB_WIDTH;

pub use loader::ConfigLoader;

/// Options controlling how a source is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct RenderConfig {
    /// Fold operator sequences into nested infix expressions
    pub fold: bool,
    /// Label missing tokens with their canonical text
    pub show_missing_tokens: bool,
    /// Space markers per tab in rendered trivia
    pub tab_width: usize,
    /// Indent JSON output
    pub pretty: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fold: false,
            show_missing_tokens: false,
            tab_width: DEFAULT_TAB_WIDTH,
            pretty: false,
        }
    }
}
