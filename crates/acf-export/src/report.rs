// Archivo: report.rs
// Propósito: agregados de dashboard — conteos por cuadrante y por balde
// de estado. Única fuente de verdad: el motor de clasificación del
// dominio, invocado item por item sobre el read model.
use acf_domain::{classify_quadrant, normalize_status, ClassifyConfig, Item, Quadrant, StatusBucket};
use serde::Serialize;

/// Conteo de items por cuadrante de la matriz 2×2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatrixReport {
    pub quick_wins: usize,
    pub strategic_projects: usize,
    pub minimal_effort: usize,
    pub risk_zone: usize,
    pub unassigned: usize,
}

/// Conteo de items por balde de estado normalizado.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub delayed: usize,
    pub unknown: usize,
    pub blank: usize,
}

/// Clasifica cada item y acumula por cuadrante. El cuadrante se
/// recalcula siempre desde (scope, resources) actuales; nunca se lee de
/// ningún lado.
pub fn matrix_report(items: &[Item], cfg: &ClassifyConfig) -> MatrixReport {
    let mut report = MatrixReport::default();
    for item in items {
        match classify_quadrant(item.scope, item.resources, cfg) {
            Quadrant::QuickWins => report.quick_wins += 1,
            Quadrant::StrategicProjects => report.strategic_projects += 1,
            Quadrant::MinimalEffort => report.minimal_effort += 1,
            Quadrant::RiskZone => report.risk_zone += 1,
            Quadrant::Unassigned => report.unassigned += 1,
        }
    }
    report
}

/// Normaliza el estado de cada item y acumula por balde. Un
/// `exec_status` sin asignar entra como string vacío, para que las
/// políticas de vacío/desconocido de `cfg` apliquen uniformemente.
pub fn status_report(items: &[Item], cfg: &ClassifyConfig) -> StatusReport {
    let mut report = StatusReport::default();
    for item in items {
        let raw = item.exec_status.map(|s| s.as_str()).unwrap_or("");
        match normalize_status(raw, cfg) {
            StatusBucket::NotStarted => report.not_started += 1,
            StatusBucket::InProgress => report.in_progress += 1,
            StatusBucket::Completed => report.completed += 1,
            StatusBucket::Delayed => report.delayed += 1,
            StatusBucket::Unknown => report.unknown += 1,
            StatusBucket::Blank => report.blank += 1,
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use acf_domain::{BlankStatusPolicy, ItemField};
    use chrono::Utc;
    use serde_json::json;

    fn item(number: &str, scope: Option<&str>, resources: Option<&str>, status: Option<&str>) -> Item {
        let mut it = Item::new(number, number.into(), Utc::now()).unwrap();
        if let Some(s) = scope {
            it.apply(ItemField::Scope, &json!(s)).unwrap();
        }
        if let Some(r) = resources {
            it.apply(ItemField::Resources, &json!(r)).unwrap();
        }
        if let Some(st) = status {
            it.apply(ItemField::ExecStatus, &json!(st)).unwrap();
        }
        it
    }

    #[test]
    fn matrix_counts_each_bucket() {
        let cfg = ClassifyConfig::default();
        let items = vec![item("AC-001", Some("narrow"), Some("high"), None),
                         item("AC-002", Some("wide"), Some("low"), None),
                         item("AC-003", Some("wide"), Some("high"), None),
                         item("AC-004", Some("narrow"), Some("low"), None),
                         item("AC-005", None, Some("high"), None)];
        let report = matrix_report(&items, &cfg);
        assert_eq!(report,
                   MatrixReport { quick_wins: 1,
                                  strategic_projects: 1,
                                  minimal_effort: 1,
                                  risk_zone: 1,
                                  unassigned: 1 });
    }

    #[test]
    fn status_counts_follow_blank_policy() {
        let cfg = ClassifyConfig::default();
        let items = vec![item("AC-001", None, None, Some("in_progress")),
                        item("AC-002", None, None, Some("completed")),
                        item("AC-003", None, None, None)];
        let report = status_report(&items, &cfg);
        assert_eq!(report.in_progress, 1);
        assert_eq!(report.completed, 1);
        assert_eq!(report.not_started, 1); // vacío → NotStarted por defecto
        assert_eq!(report.blank, 0);

        let alt = ClassifyConfig { blank_status: BlankStatusPolicy::AsBlank, ..ClassifyConfig::default() };
        let report = status_report(&items, &alt);
        assert_eq!(report.not_started, 0);
        assert_eq!(report.blank, 1);
    }
}
