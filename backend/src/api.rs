//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::db::DatasetInfo;
pub use crate::models::{DurationRange, FilterSelection, MemberSession, Metric};
pub use crate::routes::landing::ContactField;
pub use crate::routes::landing::ContactForm;
pub use crate::routes::landing::FaqEntry;
pub use crate::routes::landing::Feature;
pub use crate::routes::landing::PageContent;
pub use crate::routes::metrics::MemberMetrics;
pub use crate::routes::metrics::MetricCard;
pub use crate::routes::panels::ChannelEncoding;
pub use crate::routes::panels::ChartMark;
pub use crate::routes::panels::ChartSpec;
pub use crate::routes::panels::FilterControls;
pub use crate::routes::panels::PanelData;
pub use crate::services::pivot::{AddedRow, CellEdit, EditOverlay, LongFormRow, PivotTable, SortOrder};
pub use crate::services::stats::Aggregation;
