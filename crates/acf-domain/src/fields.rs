// Archivo: fields.rs
// Propósito: enums de los campos clasificables del `Item` y el enum
// `ItemField` que nombra los campos parchables.
//
// Cada enum tiene un único punto de parseo (`FromStr`) y una forma
// canónica en minúsculas (`as_str`). Tanto la ruta de mutación como el
// motor de clasificación pasan por aquí; ningún otro valor llega a
// persistirse.
use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Origen del item dentro del ciclo: interno o externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Internal,
    External,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

impl FromStr for Factor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(Self::Internal),
            "external" => Ok(Self::External),
            other => Err(DomainError::Validation(format!("factor inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tipo de acción asociada al item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Explore,
    Decide,
    Execute,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explore => "explore",
            Self::Decide => "decide",
            Self::Execute => "execute",
        }
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "explore" => Ok(Self::Explore),
            "decide" => Ok(Self::Decide),
            "execute" => Ok(Self::Execute),
            other => Err(DomainError::Validation(format!("action inválida: '{}'", other))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alcance del item. `Medium` se reduce a un lado u otro según la
/// configuración del motor de clasificación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Narrow,
    Medium,
    Wide,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Narrow => "narrow",
            Self::Medium => "medium",
            Self::Wide => "wide",
        }
    }
}

impl FromStr for Scope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "narrow" => Ok(Self::Narrow),
            "medium" => Ok(Self::Medium),
            "wide" => Ok(Self::Wide),
            other => Err(DomainError::Validation(format!("scope inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizonte temporal estimado del item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl TimeHorizon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl FromStr for TimeHorizon {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(DomainError::Validation(format!("time inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recursos requeridos por el item. Igual que `Scope`, el valor medio se
/// reduce según configuración.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resources {
    Low,
    Medium,
    High,
}

impl Resources {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Resources {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(DomainError::Validation(format!("resources inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado de ejecución reportado por el equipo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecStatus {
    NotStarted,
    InProgress,
    Completed,
    Delayed,
}

impl ExecStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        }
    }
}

impl FromStr for ExecStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "delayed" => Ok(Self::Delayed),
            other => Err(DomainError::Validation(format!("exec_status inválido: '{}'", other))),
        }
    }
}

impl fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nombres de los campos parchables del `Item`.
///
/// Nota: `id`, `number`, `created_at` y `updated_at` no tienen variante
/// aquí a propósito: no son representables como campo de patch, para
/// ningún rol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Title,
    Factor,
    Action,
    Scope,
    Time,
    Resources,
    CurrentStep,
    ExecStatus,
    Notes,
}

impl ItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Factor => "factor",
            Self::Action => "action",
            Self::Scope => "scope",
            Self::Time => "time",
            Self::Resources => "resources",
            Self::CurrentStep => "current_step",
            Self::ExecStatus => "exec_status",
            Self::Notes => "notes",
        }
    }
}

impl FromStr for ItemField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "factor" => Ok(Self::Factor),
            "action" => Ok(Self::Action),
            "scope" => Ok(Self::Scope),
            "time" => Ok(Self::Time),
            "resources" => Ok(Self::Resources),
            "current_step" => Ok(Self::CurrentStep),
            "exec_status" => Ok(Self::ExecStatus),
            "notes" => Ok(Self::Notes),
            other => Err(DomainError::Validation(format!("campo desconocido: '{}'", other))),
        }
    }
}

impl fmt::Display for ItemField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
