use chrono::{DateTime, Utc};

/// Fuente de tiempo del pipeline. Los pasos que estampan fechas la reciben
/// inyectada para que las pruebas puedan fijar el reloj.
pub trait TimeService: Send + Sync {
  fn time_in_utc(&self) -> DateTime<Utc>;
}

/// Reloj real.
pub struct UtcTime;

impl TimeService for UtcTime {
  fn time_in_utc(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Reloj fijo para pruebas.
pub struct FixedTime(pub DateTime<Utc>);

impl TimeService for FixedTime {
  fn time_in_utc(&self) -> DateTime<Utc> {
    self.0
  }
}
