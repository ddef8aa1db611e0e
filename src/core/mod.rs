//! Aggregation and filtering engine

pub mod aggregator;
pub mod conversion;
pub mod dates;
pub mod filter;
pub mod normalizer;
pub mod session;

pub use aggregator::{aggregate, Aggregator};
pub use conversion::{conversion_rate, parse_quote_input, ConversionRate};
pub use filter::{apply_filter, clear_filter, DateRange};
pub use normalizer::{ReservationStatus, RowNormalizer};
pub use session::ReportSession;
