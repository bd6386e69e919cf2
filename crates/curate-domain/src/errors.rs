// errors.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Colección de errores de validación de un objeto del repositorio.
///
/// Cada entrada identifica el campo ofensivo y un mensaje legible. La
/// colección pertenece al propio objeto (ver `Work::errors`) y se expone
/// completa cuando una operación falla por validación.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
  entries: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
  pub field: String,
  pub message: String,
}

impl ValidationErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registra un error para `field`.
  pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.entries.push(FieldError { field: field.into(), message: message.into() });
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }

  pub fn entries(&self) -> &[FieldError] {
    &self.entries
  }

  /// Campos ofensivos, en orden de registro.
  pub fn fields(&self) -> Vec<&str> {
    self.entries.iter().map(|e| e.field.as_str()).collect()
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let msgs: Vec<String> = self.entries.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
    write!(f, "{}", msgs.join("; "))
  }
}

/// Errores comunes del dominio de curación.
#[derive(Debug, Error, Clone)]
pub enum DomainError {
  /// El objeto no pasa las validaciones; carga la colección de campos.
  #[error("Error de validación: {0}")]
  Validation(ValidationErrors),
  /// Entidad no encontrada (obra, admin set, file set, etc.).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// Error al acceder al almacenamiento externo.
  #[error("Error de almacenamiento: {0}")]
  Storage(String),
  /// Error de serialización.
  #[error("Error de serialización: {0}")]
  Serialization(String),
}

impl From<serde_json::Error> for DomainError {
  fn from(e: serde_json::Error) -> Self {
    Self::Serialization(e.to_string())
  }
}
