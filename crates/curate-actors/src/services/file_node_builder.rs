use curate_domain::{BinaryStore, DomainError, DomainRepository, FileNode};
use std::sync::Arc;

/// Construye y persiste nodos de archivo: guarda el contenido en el almacén
/// binario, persiste el nodo y lo referencia desde su file set.
pub struct FileNodeBuilder {
  storage: Arc<dyn BinaryStore>,
  repo: Arc<dyn DomainRepository>,
}

impl FileNodeBuilder {
  pub fn new(storage: Arc<dyn BinaryStore>, repo: Arc<dyn DomainRepository>) -> Self {
    Self { storage, repo }
  }

  /// Persiste `content` y el nodo dado (aún sin `content_ref`), y añade el
  /// nodo a las referencias del file set dueño. El orden importa: el file
  /// set sólo referencia nodos completamente almacenados, de modo que un
  /// fallo intermedio no deja referencias colgantes.
  pub fn create(&self, content: &[u8], mut node: FileNode) -> Result<FileNode, DomainError> {
    let key = self.storage.put(content)?;
    node.content_ref = key;
    self.repo.save_file_node(node.clone())?;

    let mut file_set = self.repo
                           .find_file_set(&node.file_set_id)?
                           .ok_or(DomainError::NotFound(format!("file set {}", node.file_set_id)))?;
    file_set.file_node_ids.push(node.id());
    self.repo.save_file_set(file_set)?;

    Ok(node)
  }
}
