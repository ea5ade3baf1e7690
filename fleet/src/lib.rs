//! PlantView fleet: asset records, natural-language search and maintenance logic.
//!
//! The search path is `parse_search` -> `AssetFilter::apply`, driven from a
//! keystroke stream by `SearchController`. Client-side state (recent searches,
//! maintenance history) lives in a file-backed `Store`.

pub mod bulk;
pub mod calendar;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod filter;
pub mod mock;
pub mod query;
pub mod schema;
pub mod selection;
pub mod store;
pub mod url_state;
pub mod workflow;

pub use bulk::{run_bulk, BulkAction, BulkOutcome, BulkProgress};
pub use calendar::{month_view, parse_month, reschedule, CalendarDay, MonthView};
pub use config::Config;
pub use controller::{Debouncer, SearchController, SearchUpdate};
pub use error::{Error, Result};
pub use export::{assets_to_csv, export_assets_csv};
pub use filter::{AssetFilter, SpecialFilter};
pub use query::{parse_search, ParsedFilters, ParsedSearch};
pub use schema::{
    Asset, AssetLocation, AssetStatus, Criticality, EquipmentType, MaintenanceRecord,
    OrderStatus, PartsOrder, WearComponent,
};
pub use selection::Selection;
pub use store::{Store, MAINTENANCE_HISTORY_KEY, RECENT_SEARCHES_KEY};
pub use url_state::UrlState;
pub use workflow::{ChecklistItem, MaintenanceWorkflow, WorkflowStep};
