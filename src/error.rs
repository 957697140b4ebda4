#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("channel `{0}` is closed")]
    Closed(String),

    #[error("could not open `{port}`: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("could not list serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    #[error("write to `{port}` failed: {source}")]
    Io {
        port: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Key not recognized: \"{0}\"")]
    UnknownKey(String),

    #[error("Key \"{key}\" cannot be bound to both {first} and {second}")]
    ConflictingBinding {
        key: String,
        first: String,
        second: String,
    },

    #[error("Key \"{0}\" is reserved and cannot be rebound")]
    ReservedKey(String),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
