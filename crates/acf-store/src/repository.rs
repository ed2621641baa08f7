// Archivo: repository.rs
// Propósito: definir el trait `ItemRepository`, el contrato que deben
// implementar las persistencias (SQLite, in-memory, etc.).
use crate::errors::Result;
use acf_domain::Item;
use uuid::Uuid;

/// Contrato mínimo del colaborador de persistencia de items.
///
/// El repositorio es el único dueño físico de los registros; las reglas
/// de autorización y validación viven arriba, en `ItemService`. Las
/// operaciones de escritura deben ser atómicas por fila respecto de
/// llamadores concurrentes sobre el mismo `id` (un UPDATE transaccional
/// o equivalente alcanza; no se requieren transacciones entre items).
pub trait ItemRepository: Send + Sync {
    /// Inserta un item nuevo. El repositorio registra el orden de
    /// creación para poder listar en orden inverso estable.
    fn insert(&self, item: Item) -> Result<()>;

    /// Recupera un item por id. `Ok(None)` si no existe; los fallos de
    /// almacenamiento son `Storage`, nunca `None`.
    fn get(&self, id: &Uuid) -> Result<Option<Item>>;

    /// Reemplaza atómicamente la fila completa del item. Devuelve
    /// `false` si el id no existe (el llamador decide si eso es
    /// `NotFound`).
    fn update(&self, item: &Item) -> Result<bool>;

    /// Borra físicamente el item. Devuelve `true` si había una fila.
    /// Borrar un id inexistente no es un error.
    fn remove(&self, id: &Uuid) -> Result<bool>;

    /// Lista items, opcionalmente filtrados por `current_step`, en orden
    /// inverso de creación (el más reciente primero). El orden debe ser
    /// estable y reproducible para un estado fijo del store.
    fn list(&self, step: Option<u8>) -> Result<Vec<Item>>;

    /// Siguiente valor de la secuencia de numeración visible (`AC-NNN`).
    /// Monótona; nunca reusa valores, ni tras borrados.
    fn next_sequence(&self) -> Result<u64>;
}
