//! Data module - CSV loading, cleaning, feature engineering and export

mod cleaner;
mod columns;
mod explorer;
mod exporter;
mod loader;
mod transform;

pub use cleaner::{title_case, CleaningReport, DataCleaner};
pub use columns::{
    f64_column, str_column, CARAT, COLOR, CUT, PRICE, PRICE_BAND, PRICE_PER_CARAT,
    REQUIRED_COLUMNS, VALUE_CATEGORY,
};
pub use explorer::{ColumnOverview, DatasetOverview, NumericSummary};
pub use exporter::DataExporter;
pub use loader::DataLoader;
pub use transform::{round2, FeatureEngineer, PriceBand, ValueCategory};
