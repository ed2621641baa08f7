// Archivo: errors.rs
// Propósito: taxonomía de errores del tracker y el alias Result<T> usado
// por las APIs del crate.
use acf_domain::DomainError;
use thiserror::Error;

/// Errores terminales del tracker.
///
/// - `InvalidRequest`: entrada malformada o no permitida (título vacío,
///   paso fuera de dominio, patch vacío tras filtrar).
/// - `NotFound`: el item referenciado no existe.
/// - `Forbidden`: el rol no puede ejecutar esta clase de operación.
/// - `Unauthenticated`: sesión ausente, inválida o expirada.
/// - `Storage`: fallo de la capa de almacenamiento. Nunca se interpreta
///   como `NotFound`.
///
/// Ninguno se reintenta internamente; todos suben al llamador.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Solicitud inválida: {0}")]
    InvalidRequest(String),
    #[error("No encontrado: {0}")]
    NotFound(String),
    #[error("Prohibido: {0}")]
    Forbidden(String),
    #[error("No autenticado: {0}")]
    Unauthenticated(String),
    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<DomainError> for TrackerError {
    fn from(e: DomainError) -> Self {
        // Toda violación de dominio llega al llamador como entrada inválida.
        Self::InvalidRequest(e.to_string())
    }
}
