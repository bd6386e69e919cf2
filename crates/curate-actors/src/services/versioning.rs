use chrono::Utc;
use curate_domain::{DomainError, DomainRepository, FileNode, VersionRecord};

/// Acuña registros de versión inmutables para nodos de archivo. Las
/// versiones previas se conservan siempre; nunca se sobreescriben.
pub struct VersioningService;

impl VersioningService {
  /// Crea la siguiente versión para `node`, atribuida a `user`. La
  /// etiqueta es secuencial: `version1`, `version2`, ...
  pub fn create(repo: &dyn DomainRepository, node: &FileNode, user: &str) -> Result<VersionRecord, DomainError> {
    let existing = repo.versions_of(&node.id())?.len();
    let record = VersionRecord::new(node.id(), format!("version{}", existing + 1), user, Utc::now());
    repo.save_version(record.clone())?;
    Ok(record)
  }
}
