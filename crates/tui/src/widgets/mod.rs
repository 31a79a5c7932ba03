//! Dashboard widgets.

mod cycle_panel;
mod events_panel;
mod influence_chart;
mod summary_panel;
mod update;

pub use cycle_panel::CyclePanel;
pub use events_panel::EventsPanel;
pub use influence_chart::InfluenceChart;
pub use summary_panel::SummaryPanel;
pub use update::{EventEntry, SessionUpdate};
