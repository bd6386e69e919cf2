// Archivo: step.rs
// Propósito: definir el contrato `Step` que deben implementar los pasos de
// una transacción. Un paso es una unidad nombrada y sin estado propio; los
// colaboradores que necesite (repositorios, reloj) se inyectan al
// construirlo y sus parámetros de invocación llegan en `args`.

/// Paso nombrado de una transacción.
///
/// - `name` identifica al paso dentro de su pipeline; los overrides de
///   argumentos se dirigen por este nombre, así que debe ser único en la
///   transacción que lo contenga.
/// - `call` recibe el objeto objetivo en exclusiva (`&mut T`) y los
///   argumentos efectivos. Devuelve `Ok(())` para continuar el raíl o
///   `Err(E)` para cortarlo; el fallo se propaga al llamador sin cambios.
pub trait Step<T, A, E>: Send + Sync {
    /// Nombre único del paso dentro de su pipeline.
    fn name(&self) -> &str;

    /// Ejecuta la lógica del paso sobre `target` con `args`.
    fn call(&self, target: &mut T, args: &A) -> Result<(), E>;
}
