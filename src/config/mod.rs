mod settings;

pub use settings::{
    ApiConfig, DatabaseConfig, LoggingConfig, OtelConfig, RedisConfig, ServerConfig, Settings,
    StoreConfig,
};
