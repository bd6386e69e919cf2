// Archivo: jobs.rs
// Propósito: costuras hacia el ejecutor de trabajos asíncronos y hacia la
// entrega de notificaciones. Ambos son colaboradores externos: el pipeline
// encola y sigue, nunca observa el resultado.
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Trabajos diferidos que el pipeline programa tras una ingesta o a pedido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Job {
  /// Caracterización técnica del binario (mime real, dimensiones, etc.).
  Characterize { file_node_id: Uuid },
  /// Generación de derivados (miniaturas, texto extraído).
  CreateDerivatives { file_node_id: Uuid },
  /// Auditoría de integridad del contenido de un nodo.
  Audit { file_node_id: Uuid, user_key: String },
}

/// Despachador de trabajos: encolar y olvidar. El valor de retorno del
/// ejecutor nunca se consulta; un fallo del trabajo no afecta al llamador
/// síncrono que lo programó.
pub trait JobDispatcher: Send + Sync {
  fn enqueue(&self, job: Job);
}

/// Cola simple en memoria para encolar y reclamar trabajos.
///
/// Uso pensado para pruebas locales y ejemplos. No garantiza durabilidad
/// ni comportamiento distribuido.
#[derive(Debug, Default)]
pub struct InMemoryJobDispatcher {
  queue: Mutex<VecDeque<Job>>,
}

impl InMemoryJobDispatcher {
  pub fn new() -> Self {
    Self { queue: Mutex::new(VecDeque::new()) }
  }

  /// Reclama el siguiente trabajo encolado, si existe.
  pub fn claim(&self) -> Option<Job> {
    self.queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front()
  }

  pub fn len(&self) -> usize {
    self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl JobDispatcher for InMemoryJobDispatcher {
  fn enqueue(&self, job: Job) {
    self.queue.lock().unwrap_or_else(|e| e.into_inner()).push_back(job);
  }
}

/// Mensaje dirigido a un usuario del repositorio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
  pub user_key: String,
  pub subject: String,
  pub body: String,
}

/// Costura hacia la entrega de notificaciones (correo, buzón interno). La
/// entrega concreta es un colaborador externo.
pub trait Notifier: Send + Sync {
  fn notify(&self, user_key: &str, subject: &str, body: &str);
}

/// Notificador que registra los mensajes en memoria, para pruebas.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self { messages: Mutex::new(Vec::new()) }
  }

  pub fn messages(&self) -> Vec<Notification> {
    self.messages.lock().unwrap_or_else(|e| e.into_inner()).clone()
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, user_key: &str, subject: &str, body: &str) {
    let msg = Notification { user_key: user_key.to_string(),
                             subject: subject.to_string(),
                             body: body.to_string() };
    self.messages.lock().unwrap_or_else(|e| e.into_inner()).push(msg);
  }
}
