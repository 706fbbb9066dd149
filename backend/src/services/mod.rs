//! Service layer for business logic.
//!
//! Services are plain functions over the immutable session table; the HTTP
//! layer fetches the table from the repository and calls into them.

pub mod content;
pub mod panels;
pub mod pivot;
pub mod stats;
pub mod summary;

pub use content::page_content;
pub use panels::{build_panel, default_selection, filter_controls, PanelKind};
pub use pivot::{aggregate_sessions, EditOverlay, LongFormRow, PipelineError, PivotTable, SortOrder};
pub use stats::Aggregation;
pub use summary::compute_member_metrics;
