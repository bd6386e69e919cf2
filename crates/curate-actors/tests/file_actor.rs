use curate_actors::{FileActor, FileUpload, InMemoryJobDispatcher, Job};
use curate_domain::{BinaryStore, DomainError, DomainRepository, FileSet, FileUse, InMemoryBinaryStore,
                    InMemoryDomainRepository};
use std::sync::Arc;

struct Harness {
  repo: Arc<InMemoryDomainRepository>,
  storage: Arc<InMemoryBinaryStore>,
  jobs: Arc<InMemoryJobDispatcher>,
  file_set: FileSet,
}

fn harness() -> Harness {
  let repo = Arc::new(InMemoryDomainRepository::new());
  let storage = Arc::new(InMemoryBinaryStore::new());
  let jobs = Arc::new(InMemoryJobDispatcher::new());
  let file_set = FileSet::new(Some("documento.pdf".into()));
  repo.save_file_set(file_set.clone()).unwrap();
  Harness { repo, storage, jobs, file_set }
}

fn actor_for(h: &Harness) -> FileActor {
  FileActor::new(h.file_set.id(),
                 FileUse::OriginalFile,
                 "user@example.org",
                 h.repo.clone(),
                 h.storage.clone(),
                 h.jobs.clone())
}

#[test]
fn ingest_persists_content_node_version_and_schedules_jobs() {
  let h = harness();
  let actor = actor_for(&h);
  let upload = FileUpload::new("documento.pdf", "application/pdf", b"contenido pdf".to_vec());

  let node = actor.ingest(&upload).expect("ingesta exitosa");

  // contenido recuperable por su clave
  assert_eq!(h.storage.get(&node.content_ref).unwrap(), b"contenido pdf".to_vec());
  // el file set referencia al nodo nuevo
  let file_set = h.repo.find_file_set(&h.file_set.id()).unwrap().unwrap();
  assert_eq!(file_set.file_node_ids, vec![node.id()]);
  // una versión inmutable atribuida a la identidad actuante
  let versions = h.repo.versions_of(&node.id()).unwrap();
  assert_eq!(versions.len(), 1);
  assert_eq!(versions[0].label, "version1");
  assert_eq!(versions[0].committer, "user@example.org");
  // caracterización y derivados quedan encolados, nunca se ejecutan aquí
  assert_eq!(h.jobs.claim(), Some(Job::Characterize { file_node_id: node.id() }));
  assert_eq!(h.jobs.claim(), Some(Job::CreateDerivatives { file_node_id: node.id() }));
  assert!(h.jobs.claim().is_none());
}

#[test]
fn two_ingests_produce_two_immutable_retrievable_nodes() {
  let h = harness();
  let actor = actor_for(&h);

  let first = actor.ingest(&FileUpload::new("v1.txt", "text/plain", b"primera".to_vec())).expect("primera");
  let second = actor.ingest(&FileUpload::new("v2.txt", "text/plain", b"segunda".to_vec())).expect("segunda");

  assert_ne!(first.id(), second.id());
  // ninguna sobreescribe a la otra: ambas siguen recuperables
  assert_eq!(h.storage.get(&first.content_ref).unwrap(), b"primera".to_vec());
  assert_eq!(h.storage.get(&second.content_ref).unwrap(), b"segunda".to_vec());
  assert!(h.repo.find_file_node(&first.id()).unwrap().is_some());
  assert!(h.repo.find_file_node(&second.id()).unwrap().is_some());
  // cada ingesta acuñó su propio registro de versión
  assert_eq!(h.repo.versions_of(&first.id()).unwrap().len(), 1);
  assert_eq!(h.repo.versions_of(&second.id()).unwrap().len(), 1);
  // el file set las referencia en orden de ingesta
  let file_set = h.repo.find_file_set(&h.file_set.id()).unwrap().unwrap();
  assert_eq!(file_set.file_node_ids, vec![first.id(), second.id()]);
}

// Almacén binario que siempre falla, para simular errores de storage.
struct FailingStore;

impl BinaryStore for FailingStore {
  fn put(&self, _blob: &[u8]) -> Result<String, DomainError> {
    Err(DomainError::Storage("disco lleno".to_string()))
  }

  fn get(&self, _key: &str) -> Result<Vec<u8>, DomainError> {
    Err(DomainError::Storage("disco lleno".to_string()))
  }
}

#[test]
fn storage_failure_is_swallowed_and_leaves_no_reference() {
  let h = harness();
  let actor = FileActor::new(h.file_set.id(),
                             FileUse::OriginalFile,
                             "user@example.org",
                             h.repo.clone(),
                             Arc::new(FailingStore),
                             h.jobs.clone());

  let result = actor.ingest(&FileUpload::new("x.txt", "text/plain", b"x".to_vec()));
  assert!(result.is_none());
  // el file set no referencia nada y no se programó trabajo alguno
  let file_set = h.repo.find_file_set(&h.file_set.id()).unwrap().unwrap();
  assert!(file_set.file_node_ids.is_empty());
  assert!(h.jobs.is_empty());
}

#[test]
fn unknown_file_set_fails_opaquely() {
  let h = harness();
  let actor = FileActor::new(uuid::Uuid::new_v4(),
                             FileUse::OriginalFile,
                             "user@example.org",
                             h.repo.clone(),
                             h.storage.clone(),
                             h.jobs.clone());
  assert!(actor.ingest(&FileUpload::new("x.txt", "text/plain", b"x".to_vec())).is_none());
  assert!(h.jobs.is_empty());
}

#[test]
fn equality_is_by_file_set_relation_and_user() {
  let h = harness();
  let a = actor_for(&h);
  let b = actor_for(&h);
  assert_eq!(a, b);

  let other_relation = FileActor::new(h.file_set.id(),
                                      FileUse::ExtractedText,
                                      "user@example.org",
                                      h.repo.clone(),
                                      h.storage.clone(),
                                      h.jobs.clone());
  assert_ne!(a, other_relation);

  let other_user = FileActor::new(h.file_set.id(),
                                  FileUse::OriginalFile,
                                  "otra@example.org",
                                  h.repo.clone(),
                                  h.storage.clone(),
                                  h.jobs.clone());
  assert_ne!(a, other_user);
}
