//! Shared fixture helpers for integration tests.

use std::path::{Path, PathBuf};

pub const EXPORT_HEADER: &str = "Rut paciente,Nombre,Correo,Celular,Servicio,Fecha Sesión,Fecha Pago,Medio de Pago,Monto,Monto Final,Fecha Abono";

/// Write a session export fixture with the standard header plus `rows`.
pub fn write_export(dir: &Path, rows: &[&str]) -> PathBuf {
    let path = dir.join("atenciones.csv");
    let mut content = String::from(EXPORT_HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).expect("Failed to write export fixture");
    path
}

/// The three-row scenario used across tests: two sessions for one patient a
/// month apart, one session for another patient.
pub fn sample_rows() -> Vec<&'static str> {
    vec![
        "11.111.111-1,Ana Díaz,ana@mail.com,+56911111111,Consulta Nutricional,14-jun-2025 16:40,14-jun-2025,Webpay,20000,20000,",
        "11.111.111-1,Ana Díaz,ana@mail.com,+56911111111,Control,14-jul-2025 10:00,14-jul-2025,Webpay,30000,30000,",
        "22.222.222-2,Benito Rojas,benito@mail.com,+56922222222,Consulta Nutricional,10-jul-2025 12:30,10-jul-2025,Efectivo,25000,25000,",
    ]
}
