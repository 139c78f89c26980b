//! # Rusty Signals: measurement CSV header classification
//!
//! Loads `;`-delimited, `|`-quoted measurement files and sorts their columns
//! into selectable groups for plotting front-ends.
//!
//! ## Architecture
//!
//! - **State**: [`TabularDataStore`] owns the loaded table and validates paths
//! - **Data**: table model, CSV loader, header classifier, search filter,
//!   Parquet export
//! - **Settings**: persisted header structure and recently opened files
//!
//! ## Example
//!
//! ```no_run
//! use rusty_signals::{TabularDataStore, UserSettings};
//! use std::path::Path;
//!
//! fn main() -> rusty_signals::Result<()> {
//!     let settings = UserSettings::load(Path::new("user_settings.json"))?;
//!     let config = settings.general.header_structure.to_classification_config();
//!
//!     let mut store = TabularDataStore::new();
//!     store.load("measurement.csv")?;
//!
//!     for group in store.classify(&config)?.groups() {
//!         println!("{}: {} signals", group.key, group.entries.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod settings;
pub mod state;

pub use data::classify::{
    classify, search_substring, ClassificationCode, ClassificationConfig, ClassificationResult,
    HeaderEntry, HeaderGroup,
};
pub use data::filter::{FilterItem, HeaderFilter, MeasurementFilter, SearchMode};
pub use data::model::{CellValue, ColumnRef, Table};
pub use error::{DataError, Result};
pub use settings::{HeaderOption, HeaderStructureSettings, RecentFiles, UserSettings};
pub use state::TabularDataStore;
