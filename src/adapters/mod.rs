// Adapters layer: concrete implementations for external systems.

pub mod formatter;
pub mod steam;

pub use formatter::{render_report, OutputFormat};
pub use steam::{SteamEndpoints, SteamWebClient};
