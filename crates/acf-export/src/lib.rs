//! Crate `acf-export` — superficie de reporte y exportación
//!
//! Consume el read model del store (`list()`) y el motor de
//! clasificación para producir salidas tabulares: CSV con el encabezado
//! fijo del tracker, un PDF mínimo de una página y los agregados de
//! dashboard (conteos por cuadrante y por balde de estado). Nada aquí
//! muta estado; son funciones puras sobre `&[Item]`.

mod csv;
mod pdf;
mod report;

pub use csv::items_to_csv;
pub use pdf::items_to_pdf;
pub use report::{matrix_report, status_report, MatrixReport, StatusReport};
