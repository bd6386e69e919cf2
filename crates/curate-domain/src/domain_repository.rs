// domain_repository.rs
use crate::admin_set::{AdminSet, PermissionTemplate};
use crate::errors::DomainError;
use crate::file_set::{FileNode, FileSet, VersionRecord};
use crate::work::Work;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Contrato de persistencia del dominio de curación. El almacén concreto es
/// un colaborador externo; el pipeline lo trata como un almacén de objetos
/// opaco con búsqueda y guardado.
pub trait DomainRepository: Send + Sync {
  /// Recupera una obra por id.
  fn find_work(&self, id: &Uuid) -> Result<Option<Work>, DomainError>;

  /// Guarda la obra y la marca como persistida. Devuelve su id.
  fn save_work(&self, work: &mut Work) -> Result<Uuid, DomainError>;

  /// Elimina una obra. `NotFound` si no existe.
  fn delete_work(&self, id: &Uuid) -> Result<(), DomainError>;

  /// Lista todas las obras (útil para pruebas y para la CLI).
  fn list_works(&self) -> Result<Vec<Work>, DomainError>;

  fn find_admin_set(&self, id: &Uuid) -> Result<Option<AdminSet>, DomainError>;

  fn save_admin_set(&self, set: AdminSet) -> Result<Uuid, DomainError>;

  /// Devuelve el admin set por defecto del sistema, creándolo si aún no
  /// existe. Idempotente.
  fn find_or_create_default_admin_set(&self) -> Result<AdminSet, DomainError>;

  /// Plantilla de permisos asociada al admin set `source_id`.
  fn find_permission_template(&self, source_id: &Uuid) -> Result<Option<PermissionTemplate>, DomainError>;

  fn save_permission_template(&self, template: PermissionTemplate) -> Result<Uuid, DomainError>;

  fn find_file_set(&self, id: &Uuid) -> Result<Option<FileSet>, DomainError>;

  fn save_file_set(&self, file_set: FileSet) -> Result<Uuid, DomainError>;

  fn find_file_node(&self, id: &Uuid) -> Result<Option<FileNode>, DomainError>;

  /// Guarda un nodo de archivo. Los nodos son inmutables: guardar dos veces
  /// el mismo id es un error de uso, no se sobreescribe silenciosamente.
  fn save_file_node(&self, node: FileNode) -> Result<Uuid, DomainError>;

  /// Registra una versión inmutable para un nodo.
  fn save_version(&self, version: VersionRecord) -> Result<Uuid, DomainError>;

  /// Versiones de un nodo, en orden de creación.
  fn versions_of(&self, file_node_id: &Uuid) -> Result<Vec<VersionRecord>, DomainError>;
}

/// Almacén binario asociado al repositorio: guarda blobs y devuelve la
/// clave de contenido con la que recuperarlos.
pub trait BinaryStore: Send + Sync {
  /// Almacena el blob y devuelve su clave de contenido.
  fn put(&self, blob: &[u8]) -> Result<String, DomainError>;
  /// Recupera el blob por clave.
  fn get(&self, key: &str) -> Result<Vec<u8>, DomainError>;
}

/// Implementación en memoria para pruebas y cableado rápido. No durable.
pub struct InMemoryDomainRepository {
  works: Mutex<HashMap<Uuid, Work>>,
  admin_sets: Mutex<HashMap<Uuid, AdminSet>>,
  templates: Mutex<HashMap<Uuid, PermissionTemplate>>,
  file_sets: Mutex<HashMap<Uuid, FileSet>>,
  file_nodes: Mutex<HashMap<Uuid, FileNode>>,
  versions: Mutex<HashMap<Uuid, Vec<VersionRecord>>>,
}

impl InMemoryDomainRepository {
  pub fn new() -> Self {
    Self { works: Mutex::new(HashMap::new()),
           admin_sets: Mutex::new(HashMap::new()),
           templates: Mutex::new(HashMap::new()),
           file_sets: Mutex::new(HashMap::new()),
           file_nodes: Mutex::new(HashMap::new()),
           versions: Mutex::new(HashMap::new()) }
  }

  // Helper to map poisoned mutex errors into DomainError
  fn lock_map<'a, T>(&'a self, m: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, DomainError> {
    m.lock()
     .map_err(|e| DomainError::Storage(format!("Mutex '{}' poisoned: {}", name, e)))
  }
}

impl Default for InMemoryDomainRepository {
  fn default() -> Self {
    Self::new()
  }
}

impl DomainRepository for InMemoryDomainRepository {
  fn find_work(&self, id: &Uuid) -> Result<Option<Work>, DomainError> {
    let works = self.lock_map(&self.works, "works")?;
    Ok(works.get(id).cloned())
  }

  fn save_work(&self, work: &mut Work) -> Result<Uuid, DomainError> {
    work.mark_persisted();
    let id = work.id();
    let mut works = self.lock_map(&self.works, "works")?;
    works.insert(id, work.clone());
    Ok(id)
  }

  fn delete_work(&self, id: &Uuid) -> Result<(), DomainError> {
    let mut works = self.lock_map(&self.works, "works")?;
    works.remove(id)
         .map(|_| ())
         .ok_or(DomainError::NotFound(format!("obra {}", id)))
  }

  fn list_works(&self) -> Result<Vec<Work>, DomainError> {
    let works = self.lock_map(&self.works, "works")?;
    Ok(works.values().cloned().collect())
  }

  fn find_admin_set(&self, id: &Uuid) -> Result<Option<AdminSet>, DomainError> {
    let sets = self.lock_map(&self.admin_sets, "admin_sets")?;
    Ok(sets.get(id).cloned())
  }

  fn save_admin_set(&self, set: AdminSet) -> Result<Uuid, DomainError> {
    let id = set.id();
    let mut sets = self.lock_map(&self.admin_sets, "admin_sets")?;
    sets.insert(id, set);
    Ok(id)
  }

  fn find_or_create_default_admin_set(&self) -> Result<AdminSet, DomainError> {
    let mut sets = self.lock_map(&self.admin_sets, "admin_sets")?;
    if let Some(existing) = sets.values().find(|s| s.is_default()) {
      return Ok(existing.clone());
    }
    let created = AdminSet::default_set();
    sets.insert(created.id(), created.clone());
    Ok(created)
  }

  fn find_permission_template(&self, source_id: &Uuid) -> Result<Option<PermissionTemplate>, DomainError> {
    let templates = self.lock_map(&self.templates, "templates")?;
    Ok(templates.values().find(|t| &t.source_id == source_id).cloned())
  }

  fn save_permission_template(&self, template: PermissionTemplate) -> Result<Uuid, DomainError> {
    let id = template.id();
    let mut templates = self.lock_map(&self.templates, "templates")?;
    templates.insert(id, template);
    Ok(id)
  }

  fn find_file_set(&self, id: &Uuid) -> Result<Option<FileSet>, DomainError> {
    let file_sets = self.lock_map(&self.file_sets, "file_sets")?;
    Ok(file_sets.get(id).cloned())
  }

  fn save_file_set(&self, file_set: FileSet) -> Result<Uuid, DomainError> {
    let id = file_set.id();
    let mut file_sets = self.lock_map(&self.file_sets, "file_sets")?;
    file_sets.insert(id, file_set);
    Ok(id)
  }

  fn find_file_node(&self, id: &Uuid) -> Result<Option<FileNode>, DomainError> {
    let nodes = self.lock_map(&self.file_nodes, "file_nodes")?;
    Ok(nodes.get(id).cloned())
  }

  fn save_file_node(&self, node: FileNode) -> Result<Uuid, DomainError> {
    let id = node.id();
    let mut nodes = self.lock_map(&self.file_nodes, "file_nodes")?;
    if nodes.contains_key(&id) {
      return Err(DomainError::Storage(format!("el nodo {} es inmutable y ya existe", id)));
    }
    nodes.insert(id, node);
    Ok(id)
  }

  fn save_version(&self, version: VersionRecord) -> Result<Uuid, DomainError> {
    let id = version.id();
    let mut versions = self.lock_map(&self.versions, "versions")?;
    versions.entry(version.file_node_id).or_default().push(version);
    Ok(id)
  }

  fn versions_of(&self, file_node_id: &Uuid) -> Result<Vec<VersionRecord>, DomainError> {
    let versions = self.lock_map(&self.versions, "versions")?;
    Ok(versions.get(file_node_id).cloned().unwrap_or_default())
  }
}

/// Almacén binario en memoria. Las claves llevan el prefijo `mem://` para
/// distinguirlas de claves de adaptadores durables.
pub struct InMemoryBinaryStore {
  blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryBinaryStore {
  pub fn new() -> Self {
    Self { blobs: Mutex::new(HashMap::new()) }
  }

  /// Sobreescribe el contenido de una clave existente. Sólo para pruebas
  /// (por ejemplo, simular corrupción ante una auditoría de integridad).
  pub fn overwrite(&self, key: &str, blob: &[u8]) -> Result<(), DomainError> {
    let mut blobs = self.blobs
                        .lock()
                        .map_err(|e| DomainError::Storage(format!("Mutex 'blobs' poisoned: {}", e)))?;
    match blobs.get_mut(key) {
      Some(existing) => {
        *existing = blob.to_vec();
        Ok(())
      }
      None => Err(DomainError::NotFound(format!("blob {}", key))),
    }
  }
}

impl Default for InMemoryBinaryStore {
  fn default() -> Self {
    Self::new()
  }
}

impl BinaryStore for InMemoryBinaryStore {
  fn put(&self, blob: &[u8]) -> Result<String, DomainError> {
    let key = format!("mem://{}", Uuid::new_v4());
    let mut blobs = self.blobs
                        .lock()
                        .map_err(|e| DomainError::Storage(format!("Mutex 'blobs' poisoned: {}", e)))?;
    blobs.insert(key.clone(), blob.to_vec());
    Ok(key)
  }

  fn get(&self, key: &str) -> Result<Vec<u8>, DomainError> {
    let blobs = self.blobs
                    .lock()
                    .map_err(|e| DomainError::Storage(format!("Mutex 'blobs' poisoned: {}", e)))?;
    blobs.get(key)
         .cloned()
         .ok_or(DomainError::NotFound(format!("blob {}", key)))
  }
}
