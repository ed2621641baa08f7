//! Crate `acf-store` — contrato de mutación del Item Store
//!
//! Este crate define la taxonomía de errores del tracker
//! (`TrackerError`), el contrato de persistencia `ItemRepository` con una
//! implementación en memoria útil para pruebas
//! (`InMemoryItemRepository`), el servicio `ItemService` que aplica la
//! política de campos antes de cada mutación, y el proveedor de identidad
//! (`IdentityProvider` / `InMemorySessionProvider`).
//!
//! Diseño resumido:
//! - Cada mutación es atómica a nivel de llamada: el subconjunto
//!   autorizado del patch se aplica completo o no se aplica nada.
//! - Parches concurrentes sobre el mismo item corren bajo
//!   last-write-wins a granularidad de llamada; política documentada,
//!   no un defecto.
//! - Los fallos de almacenamiento son `Storage`, nunca se interpretan
//!   como `NotFound`.

pub mod errors;
pub mod repository;
pub mod service;
pub mod sessions;
pub mod stubs;

pub use errors::{Result, TrackerError};
pub use repository::ItemRepository;
pub use service::ItemService;
pub use sessions::{Identity, IdentityProvider, InMemorySessionProvider};
pub use stubs::InMemoryItemRepository;
