//! Leptos components of the dashboard

pub mod chart;
pub mod nav;
pub mod settings;
pub mod summary;
pub mod table;

pub use chart::ChartCard;
pub use nav::{Sidebar, ThemeToggle, ViewPanel};
pub use settings::SettingsPanel;
pub use summary::{ErrorCards, StatCard, SummaryCards};
pub use table::{ErrorTable, FilterBar, FilterSelect};
