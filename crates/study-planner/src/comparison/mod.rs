//! Bounded multi-select comparison: selection, aggregation, and charts.

pub mod aggregate;
pub mod chart;
pub mod selection;
mod workspace;

pub use aggregate::{
    aggregate, AggregateView, CategoryComparison, ComparisonCell, QualityCell, QualityComparison,
};
pub use chart::{
    bars, donut, Bar, ChartError, ChartSlice, DonutArc, DonutChart, DonutGeometry,
    DONUT_START_ANGLE,
};
pub use selection::{HapticCue, HapticFeedback, NoHaptics, SelectionEvent, SelectionSet};
pub use workspace::{monthly_slices, ComparisonWorkspace};
