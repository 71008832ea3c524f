// Domain layer - Records, statistics and chart geometry primitives
pub mod correlation;
pub mod dashboard;
pub mod records;
pub mod scale;
pub mod scene;
pub mod statistics;
pub mod theme;
pub mod view;
