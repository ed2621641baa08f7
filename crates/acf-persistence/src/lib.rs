//! Implementación durable del `ItemRepository` sobre SQLite.
//!
//! Una sola tabla `items` (la misma forma de columnas que el esquema
//! original del tracker) más una tabla `meta` para la secuencia de
//! numeración visible. Cada escritura es un UPDATE/DELETE por fila, lo
//! que da la atomicidad por item que exige el contrato; no hay
//! transacciones entre items.
use acf_domain::Item;
use acf_store::{ItemRepository, Result, TrackerError};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

const NUMBER_SEQ_KEY: &str = "item_number_seq";

/// Repositorio de items sobre SQLite. La conexión va detrás de un mutex
/// porque `rusqlite::Connection` no es `Sync`; la serialización de
/// escrituras que eso impone es exactamente la atomicidad por fila que
/// pide el contrato.
pub struct SqliteItemRepository {
    conn: Mutex<Connection>,
}

impl SqliteItemRepository {
    /// Abre (o crea) la base en `path` y asegura el esquema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(sql_err)?;
        let repo = Self { conn: Mutex::new(conn) };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Base en memoria, para pruebas.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(sql_err)?;
        let repo = Self { conn: Mutex::new(conn) };
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// Construye el repositorio desde el entorno: lee `ACF_DB_PATH`
    /// (cargando `.env` si existe) con `acf_tracker.sqlite` como default.
    pub fn new_from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var("ACF_DB_PATH").unwrap_or_else(|_| "acf_tracker.sqlite".to_string());
        info!("abriendo base SQLite en {}", path);
        Self::open(path)
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.execute_batch(r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS items (
              seq INTEGER PRIMARY KEY AUTOINCREMENT,
              id TEXT UNIQUE NOT NULL,
              number TEXT NOT NULL,
              title TEXT NOT NULL,
              factor TEXT,
              action TEXT,
              scope TEXT,
              time TEXT,
              resources TEXT,
              exec_status TEXT,
              notes TEXT,
              current_step INTEGER NOT NULL DEFAULT 0,
              created_at TEXT NOT NULL,
              updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS meta (
              key TEXT PRIMARY KEY,
              value INTEGER NOT NULL
            );
            "#)
            .map_err(sql_err)
    }

    /// Siembra dos items de ejemplo si la tabla está vacía (mismo seed
    /// que el tracker original). Deja la secuencia de numeración
    /// apuntando después de los sembrados.
    pub fn seed_if_empty(&self) -> Result<()> {
        let count: i64 = {
            let conn = self.lock()?;
            conn.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0)).map_err(sql_err)?
        };
        if count > 0 {
            return Ok(());
        }
        let now = Utc::now();
        let first = Item::new("Draft strategy paper", "AC-001".into(), now)?;
        let mut second = Item::new("Confirm budget approval", "AC-002".into(), now)?;
        second.current_step = 1;
        self.insert(first)?;
        self.insert(second)?;
        let conn = self.lock()?;
        conn.execute("INSERT OR REPLACE INTO meta (key, value) VALUES (?1, 2)", params![NUMBER_SEQ_KEY])
            .map_err(sql_err)?;
        info!("seed inicial de items aplicado");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| TrackerError::Storage(format!("mutex poisoned: {:?}", e)))
    }
}

fn sql_err(e: rusqlite::Error) -> TrackerError {
    TrackerError::Storage(format!("sqlite: {}", e))
}

fn parse_opt<T>(column: &str, raw: Option<String>) -> Result<Option<T>>
    where T: std::str::FromStr<Err = acf_domain::DomainError>
{
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<T>()
                    .map(Some)
                    .map_err(|e| TrackerError::Storage(format!("columna {} corrupta: {}", column, e))),
    }
}

fn parse_ts(column: &str, raw: String) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc))
                                      .map_err(|e| TrackerError::Storage(format!("columna {} corrupta: {}", column, e)))
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow { id: row.get("id")?,
                number: row.get("number")?,
                title: row.get("title")?,
                factor: row.get("factor")?,
                action: row.get("action")?,
                scope: row.get("scope")?,
                time: row.get("time")?,
                resources: row.get("resources")?,
                exec_status: row.get("exec_status")?,
                notes: row.get("notes")?,
                current_step: row.get("current_step")?,
                created_at: row.get("created_at")?,
                updated_at: row.get("updated_at")? })
}

// Fila cruda tal como sale de SQLite; la conversión a `Item` (parseo de
// enums, uuid y timestamps) se hace fuera del closure de rusqlite para
// poder devolver errores `Storage` propios.
struct RawRow {
    id: String,
    number: String,
    title: String,
    factor: Option<String>,
    action: Option<String>,
    scope: Option<String>,
    time: Option<String>,
    resources: Option<String>,
    exec_status: Option<String>,
    notes: Option<String>,
    current_step: i64,
    created_at: String,
    updated_at: String,
}

impl RawRow {
    fn into_item(self) -> Result<Item> {
        let id = Uuid::parse_str(&self.id).map_err(|e| TrackerError::Storage(format!("columna id corrupta: {}", e)))?;
        let step = u8::try_from(self.current_step)
            .map_err(|_| TrackerError::Storage(format!("columna current_step corrupta: {}", self.current_step)))?;
        Ok(Item { id,
                  number: self.number,
                  title: self.title,
                  factor: parse_opt("factor", self.factor)?,
                  action: parse_opt("action", self.action)?,
                  scope: parse_opt("scope", self.scope)?,
                  time: parse_opt("time", self.time)?,
                  resources: parse_opt("resources", self.resources)?,
                  exec_status: parse_opt("exec_status", self.exec_status)?,
                  notes: self.notes.filter(|s| !s.is_empty()),
                  current_step: step,
                  created_at: parse_ts("created_at", self.created_at)?,
                  updated_at: parse_ts("updated_at", self.updated_at)? })
    }
}

impl ItemRepository for SqliteItemRepository {
    fn insert(&self, item: Item) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO items (id, number, title, factor, action, scope, time, resources, exec_status, notes, \
             current_step, created_at, updated_at) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
            params![item.id.to_string(),
                    item.number,
                    item.title,
                    item.factor.map(|v| v.as_str()),
                    item.action.map(|v| v.as_str()),
                    item.scope.map(|v| v.as_str()),
                    item.time.map(|v| v.as_str()),
                    item.resources.map(|v| v.as_str()),
                    item.exec_status.map(|v| v.as_str()),
                    item.notes,
                    item.current_step as i64,
                    item.created_at.to_rfc3339(),
                    item.updated_at.to_rfc3339()],
        )
        .map_err(sql_err)?;
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<Item>> {
        let raw = {
            let conn = self.lock()?;
            conn.query_row("SELECT * FROM items WHERE id = ?1", params![id.to_string()], read_row)
                .optional()
                .map_err(sql_err)?
        };
        raw.map(RawRow::into_item).transpose()
    }

    fn update(&self, item: &Item) -> Result<bool> {
        let conn = self.lock()?;
        let changes = conn.execute(
            "UPDATE items SET number = ?2, title = ?3, factor = ?4, action = ?5, scope = ?6, time = ?7, \
             resources = ?8, exec_status = ?9, notes = ?10, current_step = ?11, created_at = ?12, updated_at = ?13 \
             WHERE id = ?1",
            params![item.id.to_string(),
                    item.number.as_str(),
                    item.title.as_str(),
                    item.factor.map(|v| v.as_str()),
                    item.action.map(|v| v.as_str()),
                    item.scope.map(|v| v.as_str()),
                    item.time.map(|v| v.as_str()),
                    item.resources.map(|v| v.as_str()),
                    item.exec_status.map(|v| v.as_str()),
                    item.notes.as_deref(),
                    item.current_step as i64,
                    item.created_at.to_rfc3339(),
                    item.updated_at.to_rfc3339()],
        )
        .map_err(sql_err)?;
        Ok(changes == 1)
    }

    fn remove(&self, id: &Uuid) -> Result<bool> {
        let conn = self.lock()?;
        let changes = conn.execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])
                          .map_err(sql_err)?;
        Ok(changes == 1)
    }

    fn list(&self, step: Option<u8>) -> Result<Vec<Item>> {
        let raws: Vec<RawRow> = {
            let conn = self.lock()?;
            match step {
                Some(s) => {
                    let mut stmt = conn.prepare("SELECT * FROM items WHERE current_step = ?1 ORDER BY seq DESC")
                                       .map_err(sql_err)?;
                    let rows = stmt.query_map(params![s as i64], read_row).map_err(sql_err)?;
                    rows.collect::<rusqlite::Result<_>>().map_err(sql_err)?
                }
                None => {
                    let mut stmt = conn.prepare("SELECT * FROM items ORDER BY seq DESC").map_err(sql_err)?;
                    let rows = stmt.query_map([], read_row).map_err(sql_err)?;
                    rows.collect::<rusqlite::Result<_>>().map_err(sql_err)?
                }
            }
        };
        raws.into_iter().map(RawRow::into_item).collect()
    }

    fn next_sequence(&self) -> Result<u64> {
        let conn = self.lock()?;
        conn.execute("INSERT INTO meta (key, value) VALUES (?1, 1) \
                      ON CONFLICT(key) DO UPDATE SET value = value + 1",
                     params![NUMBER_SEQ_KEY])
            .map_err(sql_err)?;
        let value: i64 = conn.query_row("SELECT value FROM meta WHERE key = ?1", params![NUMBER_SEQ_KEY], |r| r.get(0))
                             .map_err(sql_err)?;
        Ok(value as u64)
    }
}
