//! Periodic table explorer core: dataset loading, filtering and the
//! per-view derivers that the desktop front-end draws.
//!
//! ```no_run
//! use element_explorer::data::filter::{apply, FilterCriteria};
//! use element_explorer::data::loader::load_file;
//! use element_explorer::views::grid::layout;
//!
//! let dataset = load_file("data/elements.csv".as_ref())?;
//! let view = apply(&dataset, &FilterCriteria::default().with_periods([2, 3]));
//! let grid = layout(&view);
//! println!("{} cells placed", grid.placed().count());
//! # Ok::<(), element_explorer::error::DataLoadError>(())
//! ```

pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod views;
