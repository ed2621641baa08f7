// Archivo: classify.rs
// Propósito: motor de clasificación — cuadrante 2×2 derivado de
// (scope, resources) y normalización del estado de ejecución para
// reportes.
//
// Ambas funciones son puras y totales; se invocan sólo en rutas de
// lectura y nunca escriben sobre el registro (el cuadrante jamás se
// cachea ni persiste).
use crate::fields::{Resources, Scope};
use serde::{Deserialize, Serialize};

/// Cuadrante de priorización. Cinco baldes mutuamente excluyentes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quadrant {
    QuickWins,
    StrategicProjects,
    MinimalEffort,
    RiskZone,
    Unassigned,
}

/// Balde de estado normalizado para reportes.
///
/// `Blank` sólo aparece bajo la política alternativa de vacíos; con la
/// configuración por defecto un estado vacío cae en `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatusBucket {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
    Unknown,
    Blank,
}

/// Lado al que se reduce `Scope::Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeSide {
    Narrow,
    Wide,
}

/// Lado al que se reduce `Resources::Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceSide {
    Low,
    High,
}

/// Qué hacer con un estado vacío/sin asignar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlankStatusPolicy {
    /// Por defecto: vacío cuenta como `NotStarted`.
    AsNotStarted,
    /// Alternativa: mantener un balde literal `Blank`.
    AsBlank,
}

/// Qué hacer con un estado no vacío que no es ninguna clave canónica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownStatusPolicy {
    /// Por defecto: va al balde `Unknown`.
    AsUnknown,
    /// Alternativa: contarlo como `NotStarted`.
    AsNotStarted,
}

/// Configuración del motor de clasificación.
///
/// Los dos primeros campos son las constantes de dirección para reducir
/// el valor medio de cada eje; los dos últimos son interruptores
/// independientes para la normalización de estados (la referencia los
/// trata por separado, por eso no se colapsan en uno).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    pub scope_medium: ScopeSide,
    pub resources_medium: ResourceSide,
    pub blank_status: BlankStatusPolicy,
    pub unknown_status: UnknownStatusPolicy,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self { scope_medium: ScopeSide::Narrow,
               resources_medium: ResourceSide::Low,
               blank_status: BlankStatusPolicy::AsNotStarted,
               unknown_status: UnknownStatusPolicy::AsUnknown }
    }
}

fn reduce_scope(scope: Scope, cfg: &ClassifyConfig) -> ScopeSide {
    match scope {
        Scope::Narrow => ScopeSide::Narrow,
        Scope::Wide => ScopeSide::Wide,
        Scope::Medium => cfg.scope_medium,
    }
}

fn reduce_resources(resources: Resources, cfg: &ClassifyConfig) -> ResourceSide {
    match resources {
        Resources::Low => ResourceSide::Low,
        Resources::High => ResourceSide::High,
        Resources::Medium => cfg.resources_medium,
    }
}

/// Asigna el cuadrante a partir de `(scope, resources)`.
///
/// Si cualquiera de los dos ejes está sin asignar el resultado es
/// `Unassigned` incondicionalmente — la reducción del valor medio ni
/// siquiera corre. Con ambos presentes, la tabla 2×2 es exhaustiva:
/// después de reducir no existe otra combinación, así que no hay rama
/// por defecto.
pub fn classify_quadrant(scope: Option<Scope>, resources: Option<Resources>, cfg: &ClassifyConfig) -> Quadrant {
    let (scope, resources) = match (scope, resources) {
        (Some(s), Some(r)) => (s, r),
        _ => return Quadrant::Unassigned,
    };
    match (reduce_scope(scope, cfg), reduce_resources(resources, cfg)) {
        (ScopeSide::Narrow, ResourceSide::High) => Quadrant::QuickWins,
        (ScopeSide::Wide, ResourceSide::High) => Quadrant::StrategicProjects,
        (ScopeSide::Narrow, ResourceSide::Low) => Quadrant::MinimalEffort,
        (ScopeSide::Wide, ResourceSide::Low) => Quadrant::RiskZone,
    }
}

/// Normaliza un estado crudo para reportes.
///
/// Pliega mayúsculas y espacios (los internos colapsan a `_`, así
/// "In Progress" y "in_progress" son la misma clave); las cuatro claves
/// canónicas mapean directo, el vacío y lo no reconocido siguen los
/// interruptores de `cfg`.
pub fn normalize_status(raw: &str, cfg: &ClassifyConfig) -> StatusBucket {
    let normalized = raw.trim().to_lowercase().split_whitespace().collect::<Vec<_>>().join("_");
    match normalized.as_str() {
        "" => match cfg.blank_status {
            BlankStatusPolicy::AsNotStarted => StatusBucket::NotStarted,
            BlankStatusPolicy::AsBlank => StatusBucket::Blank,
        },
        "not_started" => StatusBucket::NotStarted,
        "in_progress" => StatusBucket::InProgress,
        "completed" => StatusBucket::Completed,
        "delayed" => StatusBucket::Delayed,
        _ => match cfg.unknown_status {
            UnknownStatusPolicy::AsUnknown => StatusBucket::Unknown,
            UnknownStatusPolicy::AsNotStarted => StatusBucket::NotStarted,
        },
    }
}
