//! Inventory data ingestion.
//!
//! Loads a spreadsheet-style CSV export into a Polars DataFrame whose
//! columns keep their source names. Mapping those names onto the canonical
//! schema happens in `labstock-map`.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use labstock_ingest::{column_names, read_inventory_csv};
//!
//! let df = read_inventory_csv(Path::new("inventory.csv"))?;
//! println!("{:?}", column_names(&df));
//! ```

mod reader;
mod error;
mod values;

pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size_with_limit, frame_from_rows, read_inventory_csv,
    validate_encoding,
};
pub use error::{IngestError, Result};
pub use values::{
    any_to_string, any_to_string_non_empty, cell_string, column_names, format_numeric, parse_f64,
};
