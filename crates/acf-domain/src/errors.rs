// Archivo: errors.rs
// Propósito: definir los errores del dominio del tracker.
use thiserror::Error;

/// Errores del dominio ACF.
///
/// - `Validation`: el valor no pertenece al dominio declarado del campo.
/// - `Serialization`: fallo al (de)serializar un valor JSON.
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    Validation(String),
    #[error("Error de serialización: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
