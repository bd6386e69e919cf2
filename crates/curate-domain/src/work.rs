// work.rs
use crate::errors::{DomainError, ValidationErrors};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Niveles de visibilidad de una obra. El valor textual es el que viaja en
/// atributos y el que ven las capas externas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
  Restricted,
  Authenticated,
  Open,
}

impl Visibility {
  pub fn as_str(&self) -> &'static str {
    match self {
      Visibility::Restricted => "restricted",
      Visibility::Authenticated => "authenticated",
      Visibility::Open => "open",
    }
  }
}

impl FromStr for Visibility {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "restricted" => Ok(Visibility::Restricted),
      "authenticated" => Ok(Visibility::Authenticated),
      "open" => Ok(Visibility::Open),
      other => {
        let mut errs = ValidationErrors::new();
        errs.add("visibility", format!("valor de visibilidad desconocido: {}", other));
        Err(DomainError::Validation(errs))
      }
    }
  }
}

impl fmt::Display for Visibility {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Obra del repositorio (curation concern): metadatos, miembros ordenados y
/// estado de política por defecto. Nace como borrador en memoria; sólo pasa
/// a `persisted` cuando la transacción de creación completa llega al paso de
/// guardado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Work {
  id: Uuid,
  pub title: Vec<String>,
  pub creator: Vec<String>,
  pub subject: Vec<String>,
  pub description: Vec<String>,
  pub keyword: Vec<String>,
  pub depositor: Option<String>,
  pub visibility: Option<Visibility>,
  pub admin_set_id: Option<Uuid>,
  /// Miembros (hijos) de la obra, en orden significativo.
  pub member_ids: Vec<Uuid>,
  /// Obras padre a las que esta obra pertenece como miembro.
  pub member_of_ids: Vec<Uuid>,
  pub edit_users: Vec<String>,
  pub edit_groups: Vec<String>,
  pub read_users: Vec<String>,
  pub read_groups: Vec<String>,
  pub date_uploaded: Option<DateTime<Utc>>,
  pub date_modified: Option<DateTime<Utc>>,
  persisted: bool,
  errors: ValidationErrors,
}

impl Work {
  /// Crea un borrador vacío (sin título, sin visibilidad, sin admin set).
  pub fn new_draft() -> Self {
    Self { id: Uuid::new_v4(),
           title: Vec::new(),
           creator: Vec::new(),
           subject: Vec::new(),
           description: Vec::new(),
           keyword: Vec::new(),
           depositor: None,
           visibility: None,
           admin_set_id: None,
           member_ids: Vec::new(),
           member_of_ids: Vec::new(),
           edit_users: Vec::new(),
           edit_groups: Vec::new(),
           read_users: Vec::new(),
           read_groups: Vec::new(),
           date_uploaded: None,
           date_modified: None,
           persisted: false,
           errors: ValidationErrors::new() }
  }

  /// Borrador con título, atajo para pruebas y ejemplos.
  pub fn with_title(title: impl Into<String>) -> Self {
    let mut work = Self::new_draft();
    work.title = vec![title.into()];
    work
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn is_persisted(&self) -> bool {
    self.persisted
  }

  /// Marca la obra como persistida. Sólo el repositorio debe llamarlo al
  /// completar un guardado.
  pub fn mark_persisted(&mut self) {
    self.persisted = true;
  }

  pub fn errors(&self) -> &ValidationErrors {
    &self.errors
  }

  /// Registra un error de validación sobre la obra. Lo usan los pasos que
  /// detectan estado inválido fuera de `validate`.
  pub fn record_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.errors.add(field, message);
  }

  /// Visibilidad efectiva: `restricted` mientras no se asigne otra.
  pub fn effective_visibility(&self) -> Visibility {
    self.visibility.unwrap_or(Visibility::Restricted)
  }

  /// Aplica (asigna) el mapa de atributos sobre la obra. Claves no
  /// reconocidas o valores mal tipados se registran en la colección de
  /// errores de la propia obra y la operación falla completa.
  pub fn apply_attributes(&mut self, attributes: &IndexMap<String, JsonValue>) -> Result<(), DomainError> {
    let mut errs = ValidationErrors::new();
    // Primera pasada: validar todas las claves y tipos antes de asignar.
    let mut parsed: Vec<(String, ParsedAttribute)> = Vec::new();
    for (key, value) in attributes {
      match key.as_str() {
        "title" | "creator" | "subject" | "description" | "keyword" => match string_list(value) {
          Some(list) => parsed.push((key.clone(), ParsedAttribute::List(list))),
          None => errs.add(key.clone(), "debe ser una lista de cadenas"),
        },
        "visibility" => match value.as_str().map(Visibility::from_str) {
          Some(Ok(vis)) => parsed.push((key.clone(), ParsedAttribute::Visibility(vis))),
          _ => errs.add("visibility", "valor de visibilidad inválido"),
        },
        other => errs.add(other.to_string(), "atributo no reconocido para este tipo de obra"),
      }
    }
    if !errs.is_empty() {
      self.errors = errs.clone();
      return Err(DomainError::Validation(errs));
    }
    for (key, attr) in parsed {
      match (key.as_str(), attr) {
        ("title", ParsedAttribute::List(v)) => self.title = v,
        ("creator", ParsedAttribute::List(v)) => self.creator = v,
        ("subject", ParsedAttribute::List(v)) => self.subject = v,
        ("description", ParsedAttribute::List(v)) => self.description = v,
        ("keyword", ParsedAttribute::List(v)) => self.keyword = v,
        ("visibility", ParsedAttribute::Visibility(vis)) => self.visibility = Some(vis),
        _ => {}
      }
    }
    Ok(())
  }

  /// Valida los requisitos mínimos de la obra y deja el resultado en su
  /// colección de errores. Devuelve `true` si la obra es válida.
  pub fn validate(&mut self) -> bool {
    self.errors.clear();
    if self.title.iter().all(|t| t.trim().is_empty()) {
      self.errors.add("title", "no puede estar vacío");
    }
    if self.depositor.as_deref().map(str::trim).unwrap_or("").is_empty() {
      self.errors.add("depositor", "no puede estar vacío");
    }
    self.errors.is_empty()
  }
}

enum ParsedAttribute {
  List(Vec<String>),
  Visibility(Visibility),
}

// Acepta ["a", "b"] y también un escalar "a" como lista de un elemento.
fn string_list(value: &JsonValue) -> Option<Vec<String>> {
  match value {
    JsonValue::String(s) => Some(vec![s.clone()]),
    JsonValue::Array(items) => {
      let mut out = Vec::with_capacity(items.len());
      for item in items {
        out.push(item.as_str()?.to_string());
      }
      Some(out)
    }
    _ => None,
  }
}

impl fmt::Display for Work {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "Work(id: {}, title: {}, visibility: {})",
           self.id,
           self.title.first().map(String::as_str).unwrap_or("<sin título>"),
           self.effective_visibility())
  }
}
