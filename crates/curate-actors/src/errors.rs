use curate_domain::{DomainError, ValidationErrors};
use thiserror::Error;

// Taxonomía de fallos de las operaciones de depósito.
//
// Cada variante es distinguible por clase para que el llamador pueda
// ramificar: validación (con la colección de campos de la propia obra),
// autorización, dependencia faltante, almacenamiento y no-encontrado.
#[derive(Error, Debug, Clone)]
pub enum DepositError {
  /// La obra no pasa las validaciones; carga su colección de errores.
  #[error("Error de validación: {0}")]
  Validation(ValidationErrors),

  /// La identidad actuante carece de derechos para la acción.
  #[error("No autorizado: {0}")]
  Authorization(String),

  /// Un admin set o una plantilla de permisos referenciada no existe.
  #[error("Dependencia faltante: {0}")]
  MissingDependency(String),

  /// El almacén de objetos o de binarios falló.
  #[error("Error de almacenamiento: {0}")]
  Storage(String),

  /// Un objeto referenciado (miembro, padre, archivo) no resuelve.
  #[error("No encontrado: {0}")]
  NotFound(String),
}

impl DepositError {
  /// Mensaje apto para superficies de usuario. Las fallas de autorización
  /// se presentan igual que un no-encontrado para no revelar la existencia
  /// de objetos sobre los que la identidad no tiene derechos.
  pub fn user_message(&self) -> String {
    match self {
      DepositError::Authorization(_) | DepositError::NotFound(_) => "No encontrado".to_string(),
      other => other.to_string(),
    }
  }
}

impl From<DomainError> for DepositError {
  fn from(e: DomainError) -> Self {
    match e {
      DomainError::Validation(errors) => DepositError::Validation(errors),
      DomainError::NotFound(what) => DepositError::NotFound(what),
      DomainError::Storage(msg) => DepositError::Storage(msg),
      DomainError::Serialization(msg) => DepositError::Storage(msg),
    }
  }
}
