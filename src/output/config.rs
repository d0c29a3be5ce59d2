//! Display configuration

use crate::selector::{Selector, StokesSelector};
use crate::style::Theme;

/// Configuration for one rendering pass.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Indent with tabs (default) or four spaces per level.
    pub use_tabs: bool,
    pub use_color: bool,
    pub theme: Theme,
    /// Schema depth to expand to: 0 = root only, 6 = everything.
    pub level: u8,
    pub sap: Selector,
    pub beam: Selector,
    pub stokes: StokesSelector,
    /// Stored for CLI parity; the renderer does not consult it.
    pub verbose: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_tabs: true,
            use_color: false,
            theme: Theme::Dark,
            level: 6,
            sap: Selector::All,
            beam: Selector::All,
            stokes: StokesSelector::All,
            verbose: false,
        }
    }
}
