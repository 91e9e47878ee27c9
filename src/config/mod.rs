pub mod schema;

pub use schema::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, Config, ProviderConfig};
