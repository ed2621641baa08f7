// Archivo: stages.rs
// Propósito: metadata estática de las cinco etapas del ciclo ACF.
//
// Es configuración fija, no estado derivado: el core sólo valida
// `current_step` contra el dominio entero [0, STEP_MAX].
use serde::Serialize;

/// Último paso válido del ciclo.
pub const STEP_MAX: u8 = 4;

/// Tripleta (id, key, label) de una etapa del ciclo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageInfo {
    pub id: u8,
    pub key: &'static str,
    pub label: &'static str,
}

const STAGES: [StageInfo; 5] = [StageInfo { id: 0, key: "item", label: "Item" },
                                StageInfo { id: 1, key: "factor", label: "Factor" },
                                StageInfo { id: 2, key: "action", label: "Action" },
                                StageInfo { id: 3, key: "str", label: "Scope/Time/Resources" },
                                StageInfo { id: 4, key: "status", label: "Status" }];

/// Las cinco etapas fijas, en orden.
pub fn stages() -> &'static [StageInfo] {
    &STAGES
}

/// Metadata de la etapa `step`, si está en dominio.
pub fn stage_for(step: u8) -> Option<&'static StageInfo> {
    STAGES.get(step as usize)
}
