//! Presentational components shared by the dashboard pages.

mod chart;
mod domains;
mod stat;
mod table;

pub use chart::LineChartCard;
pub use domains::{DomainChecklist, selected_in_order, with_assigned};
pub use stat::{StatCardView, SummaryCardView};
pub use table::{Cell, DataTableCard, PaginationBar};
