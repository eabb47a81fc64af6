use thiserror::Error;

use crate::condition::body_part::BodyPart;
use crate::physique::ambulation::Ambulation;

/// Construction and configuration failures.
///
/// Damage and metabolism never return these: they clamp instead.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Bone already registered for {0:?}")]
    DuplicateBone(BodyPart),

    #[error("Skeleton is finalized, no more bones can be added")]
    SkeletonFinalized,

    #[error("Armor component is not humanoid: {0}")]
    NotHumanoid(String),

    #[error("Ambulation table is missing {0:?}")]
    MissingAmbulation(Ambulation),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
