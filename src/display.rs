//! Terminal presentation of a [`Report`]. Read-only over the report; all
//! numbers arrive already guarded, so rendering never recomputes metrics.

use crate::models::{PatientProfile, Report};
use crate::utils::format_clp;
use chrono::NaiveDate;
use colored::*;

pub struct ReportDisplayManager;

impl Default for ReportDisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportDisplayManager {
    pub fn new() -> Self {
        Self
    }

    pub fn display_summary(&self, report: &Report, json_output: bool) {
        if json_output {
            self.print_json(report);
            return;
        }

        self.print_banner("Nutridash - Resumen de Pacientes e Ingresos");

        println!(
            "\n📊 {} pacientes • {} atenciones • ${} total\n",
            report.total_pacientes,
            report.total_atenciones,
            format_clp(report.total_ingresos)
        );

        println!("   Ingreso promedio por atención: ${}", format_clp(report.promedio_monto));
        println!(
            "   Valor promedio por paciente: ${}",
            format_clp(report.valor_promedio_por_paciente)
        );
        println!("   Tasa de retención: {:.1}%", report.tasa_retencion);
        println!(
            "   Oportunidad: {:.1}% no regresan",
            100.0 - report.tasa_retencion
        );
        println!("   Pacientes este mes: {}", report.pacientes_este_mes);

        let inactivos = format!("{}", report.pacientes_inactivos.len());
        println!(
            "   Inactivos (+2 meses): {}",
            if report.pacientes_inactivos.is_empty() {
                inactivos.normal()
            } else {
                inactivos.red().bold()
            }
        );
        println!("   Tipos de servicio: {}", report.servicios.len());
    }

    pub fn display_monthly(&self, report: &Report, limit: Option<usize>, json_output: bool) {
        if json_output {
            let output = serde_json::json!({"monthly": report.monthly_data});
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            return;
        }

        self.print_banner("Nutridash - Tendencia Mensual (últimos 12 meses)");
        println!();

        let display_limit = limit.unwrap_or(report.monthly_data.len());
        let skip = report.monthly_data.len().saturating_sub(display_limit);

        for bucket in report.monthly_data.iter().skip(skip) {
            println!(
                "📅 {} — {} atenciones • {} pacientes • ${} (${} promedio)",
                bucket.mes,
                bucket.atenciones,
                bucket.pacientes,
                format_clp(bucket.ingresos),
                format_clp(bucket.promedio_atencion)
            );
        }
    }

    pub fn display_services(&self, report: &Report, limit: Option<usize>, json_output: bool) {
        if json_output {
            let output = serde_json::json!({
                "servicios": report.servicios,
                "precios": report.precios,
                "mediosPago": report.medios_pago,
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            return;
        }

        self.print_banner("Nutridash - Servicios, Precios y Medios de Pago");

        println!("\n🏷️  Servicios populares:");
        let display_limit = limit.unwrap_or(report.servicios.len());
        for stat in report.servicios.iter().take(display_limit) {
            let nombre = if stat.nombre.is_empty() {
                "(sin servicio)"
            } else {
                stat.nombre.as_str()
            };
            println!(
                "   {}: {} citas • {} pacientes • ${} (${} promedio)",
                nombre,
                stat.cantidad,
                stat.pacientes_unicos,
                format_clp(stat.ingresos),
                format_clp(stat.ingreso_promedio)
            );
        }

        println!("\n💰 Precios frecuentes:");
        if report.precios.is_empty() {
            println!("   (ningún precio se repite lo suficiente)");
        }
        for bucket in &report.precios {
            println!(
                "   {}: {} citas ({:.1}%)",
                bucket.precio, bucket.cantidad, bucket.porcentaje
            );
        }

        println!("\n💳 Medios de pago:");
        for stat in &report.medios_pago {
            println!(
                "   {}: {} citas ({:.1}%)",
                stat.medio, stat.cantidad, stat.porcentaje
            );
        }
    }

    pub fn display_inactive(
        &self,
        report: &Report,
        today: NaiveDate,
        limit: Option<usize>,
        json_output: bool,
    ) {
        if json_output {
            let output = serde_json::json!({"pacientesInactivos": report.pacientes_inactivos});
            println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
            return;
        }

        self.print_banner("Nutridash - Pacientes para Contactar");

        println!(
            "\n📞 {} pacientes inactivos por más de 2 meses\n",
            report.pacientes_inactivos.len()
        );

        let display_limit = limit.unwrap_or(10);
        for patient in report.pacientes_inactivos.iter().take(display_limit) {
            self.print_inactive_patient(patient, today);
        }

        if report.pacientes_inactivos.len() > display_limit {
            println!(
                "   ... {} más (use --limit o exporte la lista completa)",
                report.pacientes_inactivos.len() - display_limit
            );
        }
    }

    fn print_inactive_patient(&self, patient: &PatientProfile, today: NaiveDate) {
        let dias = (today - patient.ultima_visita).num_days();
        let contacto = if !patient.celular.is_empty() {
            patient.celular.as_str()
        } else if !patient.correo.is_empty() {
            patient.correo.as_str()
        } else {
            "sin contacto"
        };

        println!(
            "   {} | {} — última visita {} ({} días) • {} citas • ${} (${} por visita) • {}",
            patient.rut,
            patient.nombre,
            patient.ultima_visita.format("%d-%m-%Y"),
            dias,
            patient.total_atenciones,
            format_clp(patient.total_gastado),
            format_clp(patient.promedio_por_atencion()),
            contacto
        );
    }

    fn print_json(&self, report: &Report) {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
    }

    fn print_banner(&self, title: &str) {
        println!("\n{}", "=".repeat(80));
        println!("{}", title.bold());
        println!("{}", "=".repeat(80));
    }
}
