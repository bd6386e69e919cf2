// file_set.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Agrupa nodos de archivo (original y derivados) bajo un archivo lógico.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSet {
  id: Uuid,
  pub title: Option<String>,
  /// Nodos referenciados por este file set, en orden de ingesta.
  pub file_node_ids: Vec<Uuid>,
}

impl FileSet {
  pub fn new(title: Option<String>) -> Self {
    Self { id: Uuid::new_v4(), title, file_node_ids: Vec::new() }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }
}

/// Uso/relación de un nodo dentro del file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileUse {
  OriginalFile,
  ExtractedText,
  Thumbnail,
}

impl fmt::Display for FileUse {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      FileUse::OriginalFile => "original_file",
      FileUse::ExtractedText => "extracted_text",
      FileUse::Thumbnail => "thumbnail",
    };
    write!(f, "{}", s)
  }
}

/// Un binario almacenado más su etiqueta de uso. Inmutable una vez escrito:
/// cada ingesta produce un nodo nuevo y los anteriores se conservan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
  id: Uuid,
  pub file_set_id: Uuid,
  pub use_relation: FileUse,
  /// Clave del contenido en el almacén binario.
  pub content_ref: String,
  /// Digest SHA-256 (hex) del contenido al momento de la ingesta.
  pub checksum: String,
  pub mime_type: String,
  pub original_name: String,
  pub created_at: DateTime<Utc>,
}

impl FileNode {
  /// Construye un nodo aún no almacenado (`content_ref` vacío) para el
  /// contenido dado. El checksum se calcula aquí, antes de persistir.
  pub fn unsaved(file_set_id: Uuid,
                 use_relation: FileUse,
                 content: &[u8],
                 mime_type: impl Into<String>,
                 original_name: impl Into<String>,
                 created_at: DateTime<Utc>)
                 -> Self {
    Self { id: Uuid::new_v4(),
           file_set_id,
           use_relation,
           content_ref: String::new(),
           checksum: content_checksum(content),
           mime_type: mime_type.into(),
           original_name: original_name.into(),
           created_at }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }
}

/// Registro inmutable de versión: una por cada ingesta exitosa, ligada al
/// nodo creado y a la identidad actuante.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
  id: Uuid,
  pub file_node_id: Uuid,
  pub label: String,
  pub committer: String,
  pub created_at: DateTime<Utc>,
}

impl VersionRecord {
  pub fn new(file_node_id: Uuid, label: impl Into<String>, committer: impl Into<String>, created_at: DateTime<Utc>) -> Self {
    Self { id: Uuid::new_v4(), file_node_id, label: label.into(), committer: committer.into(), created_at }
  }

  pub fn id(&self) -> Uuid {
    self.id
  }
}

/// Digest SHA-256 en hexadecimal del contenido dado.
pub fn content_checksum(content: &[u8]) -> String {
  let mut hasher = Sha256::new();
  hasher.update(content);
  format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_checksum_is_stable() {
    let a = content_checksum(b"contenido");
    let b = content_checksum(b"contenido");
    assert_eq!(a, b);
    assert_ne!(a, content_checksum(b"otro contenido"));
  }

  #[test]
  fn test_unsaved_node_has_no_content_ref() {
    let fs = FileSet::new(Some("archivo.pdf".into()));
    let node = FileNode::unsaved(fs.id(), FileUse::OriginalFile, b"bytes", "application/pdf", "archivo.pdf", Utc::now());
    assert!(node.content_ref.is_empty());
    assert_eq!(node.checksum, content_checksum(b"bytes"));
    assert_eq!(node.file_set_id, fs.id());
  }
}
