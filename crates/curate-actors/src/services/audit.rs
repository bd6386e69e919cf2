use crate::jobs::Notifier;
use curate_domain::{content_checksum, BinaryStore, DomainError, DomainRepository};
use std::sync::Arc;
use uuid::Uuid;

/// Resultado de una auditoría de integridad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditStatus {
  Pass,
  Fail,
}

/// Auditoría de integridad de contenido: recalcula el digest del binario
/// almacenado y lo compara con el checksum registrado en el nodo. El
/// resultado se notifica al usuario indicado; normalmente corre como
/// trabajo asíncrono (`Job::Audit`), y en pruebas de forma síncrona.
pub struct AuditService {
  repo: Arc<dyn DomainRepository>,
  storage: Arc<dyn BinaryStore>,
  notifier: Arc<dyn Notifier>,
}

impl AuditService {
  /// Asunto de la notificación cuando la auditoría pasa.
  pub const PASS: &'static str = "Auditoría de integridad superada";
  /// Asunto cuando el contenido no coincide con el checksum registrado.
  pub const FAIL: &'static str = "Auditoría de integridad fallida";

  pub fn new(repo: Arc<dyn DomainRepository>, storage: Arc<dyn BinaryStore>, notifier: Arc<dyn Notifier>) -> Self {
    Self { repo, storage, notifier }
  }

  /// Audita el nodo indicado y notifica a `user_key` con el resultado.
  pub fn audit(&self, file_node_id: &Uuid, user_key: &str) -> Result<AuditStatus, DomainError> {
    let node = self.repo
                   .find_file_node(file_node_id)?
                   .ok_or(DomainError::NotFound(format!("nodo de archivo {}", file_node_id)))?;
    let content = self.storage.get(&node.content_ref)?;

    let status = if content_checksum(&content) == node.checksum {
      AuditStatus::Pass
    } else {
      AuditStatus::Fail
    };

    match status {
      AuditStatus::Pass => {
        self.notifier.notify(user_key,
                             Self::PASS,
                             &format!("El contenido de {} coincide con su checksum", node.original_name));
      }
      AuditStatus::Fail => {
        log::warn!("auditoría fallida para el nodo {} ({})", node.id(), node.original_name);
        self.notifier.notify(user_key,
                             Self::FAIL,
                             &format!("El contenido de {} no coincide con su checksum", node.original_name));
      }
    }

    Ok(status)
  }
}
