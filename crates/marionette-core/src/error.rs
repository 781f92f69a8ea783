use thiserror::Error;

/// Top-level error type for marionette-core.
#[derive(Debug, Error)]
pub enum MarionetteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Empty bone name in {context}")]
    EmptyBoneName { context: String },

    #[error("Rotation offset component {value} out of [-pi, pi] for mapping '{owner}'")]
    OffsetOutOfRange { owner: String, value: f32 },

    #[error("IK influence {value} out of [0, 1] for mapping '{owner}'")]
    InfluenceOutOfRange { owner: String, value: f32 },

    #[error("Owner bone '{0}' appears in more than one mapping")]
    DuplicateOwner(String),
}

/// Mapping container errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    #[error("Owner bone '{0}' is already mapped")]
    OwnerAlreadyMapped(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
