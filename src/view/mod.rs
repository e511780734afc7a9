//! Per-player counter views.

pub mod counter;

pub use counter::{LifeCounterView, RegionLayout, ViewContext, ViewOutput};
