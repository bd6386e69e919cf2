use crate::jobs::{Job, JobDispatcher};
use crate::services::{FileNodeBuilder, VersioningService};
use chrono::Utc;
use curate_domain::{BinaryStore, DomainRepository, FileNode, FileUse};
use std::sync::Arc;
use uuid::Uuid;

/// Carga binaria entrante: contenido más los metadatos mínimos con los que
/// construir un nodo de archivo.
#[derive(Debug, Clone)]
pub struct FileUpload {
  pub original_name: String,
  pub mime_type: String,
  pub content: Vec<u8>,
}

impl FileUpload {
  pub fn new(original_name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
    Self { original_name: original_name.into(), mime_type: mime_type.into(), content }
  }

  /// Nodo aún sin almacenar para este contenido, etiquetado con `relation`.
  pub fn to_file_node(&self, file_set_id: Uuid, relation: FileUse) -> FileNode {
    FileNode::unsaved(file_set_id, relation, &self.content, self.mime_type.clone(), self.original_name.clone(), Utc::now())
  }
}

/// Acciones sobre un archivo identificado por file set y relación de uso.
///
/// Ingesta el binario como parte del file set y registra una versión nueva;
/// la caracterización y los derivados se difieren a trabajos asíncronos.
pub struct FileActor {
  file_set_id: Uuid,
  relation: FileUse,
  user: String,
  repo: Arc<dyn DomainRepository>,
  storage: Arc<dyn BinaryStore>,
  jobs: Arc<dyn JobDispatcher>,
}

impl FileActor {
  pub fn new(file_set_id: Uuid,
             relation: FileUse,
             user: impl Into<String>,
             repo: Arc<dyn DomainRepository>,
             storage: Arc<dyn BinaryStore>,
             jobs: Arc<dyn JobDispatcher>)
             -> Self {
    Self { file_set_id, relation, user: user.into(), repo, storage, jobs }
  }

  /// Persiste el archivo como parte del file set y acuña una versión nueva.
  /// Programa además los trabajos de caracterización y derivados.
  ///
  /// Devuelve el nodo guardado, o `None` ante cualquier fallo de
  /// almacenamiento: el fallo es opaco en esta frontera y ningún nodo
  /// parcial queda referenciado por el file set.
  pub fn ingest(&self, io: &FileUpload) -> Option<FileNode> {
    let unsaved = io.to_file_node(self.file_set_id, self.relation);
    let builder = FileNodeBuilder::new(self.storage.clone(), self.repo.clone());

    let saved = match builder.create(&io.content, unsaved) {
      Ok(node) => node,
      Err(e) => {
        log::warn!("ingesta fallida en el file set {}: {}", self.file_set_id, e);
        return None;
      }
    };

    if let Err(e) = VersioningService::create(self.repo.as_ref(), &saved, &self.user) {
      log::warn!("no se pudo acuñar versión para el nodo {}: {}", saved.id(), e);
      return None;
    }

    self.jobs.enqueue(Job::Characterize { file_node_id: saved.id() });
    self.jobs.enqueue(Job::CreateDerivatives { file_node_id: saved.id() });
    Some(saved)
  }
}

impl std::fmt::Debug for FileActor {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FileActor")
      .field("file_set_id", &self.file_set_id)
      .field("relation", &self.relation)
      .field("user", &self.user)
      .finish_non_exhaustive()
  }
}

// La comparación se limita a (file set, relación, usuario): suficiente dado
// que las operaciones corren al otro lado de una recuperación por id en
// trabajos asíncronos.
impl PartialEq for FileActor {
  fn eq(&self, other: &Self) -> bool {
    self.file_set_id == other.file_set_id && self.relation == other.relation && self.user == other.user
  }
}

impl Eq for FileActor {}
