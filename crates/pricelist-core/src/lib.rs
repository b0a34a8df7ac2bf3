pub mod app_config;
pub mod cell;
pub mod config;
pub mod discounts;
pub mod format;
pub mod pricing;
pub mod records;

use thiserror::Error;

pub use app_config::AppConfig;
pub use cell::CellValue;
pub use config::{load_app_config, load_app_config_from_env};
pub use discounts::{load_discounts, DiscountTable};
pub use format::{format_grouped, PriceFormat};
pub use pricing::{classify_price, quote, PriceCell, PriceQuote};
pub use records::PriceRecord;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read discounts file {path}: {source}")]
    DiscountsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse discounts file: {0}")]
    DiscountsFileParse(#[from] serde_yaml::Error),

    #[error("invalid discounts configuration: {0}")]
    Validation(String),
}
