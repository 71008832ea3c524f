// Application layer - Fetch-and-derive use cases and chart routines
pub mod charts;
pub mod dashboard_service;
pub mod error;
pub mod metrics_source;
pub mod redraw;
pub mod summary;
pub mod view_scope;
