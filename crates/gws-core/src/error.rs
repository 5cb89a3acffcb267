//! Error types for `gws-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("entity type could not be inferred for ID: {0}")]
  UninferrableEntity(String),

  #[error("member type could not be inferred for ID: {0}")]
  UninferrableMember(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
