//! Report text generation.
//!
//! Two text surfaces: the shareable end-of-day summary message and the full
//! history report. The history report is the same format the import parser
//! reads back, so exported data can be re-imported losslessly.

use crate::domain::models::Service;
use crate::domain::reporting::summarize;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{error, info};
use std::fs;
use std::path::PathBuf;

/// Result of writing a report to disk. Failures are reported here rather
/// than as errors so the caller can show the message as-is.
#[derive(Debug, Clone)]
pub struct ExportToPathResult {
    pub success: bool,
    pub message: String,
    pub file_path: String,
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// The shareable "Resumo do Dia" message for one day's services.
    pub fn daily_summary_text(&self, date: NaiveDate, services: &[Service]) -> String {
        let summary = summarize(services);
        let mut text = format!(
            "*Resumo do Dia - {}*\n\n*Total Geral: R${}*\n-----------------------------------\n*Detalhes:*\n- Dinheiro: R${}\n- Pagamento Online: R${}\n\n*Serviços Realizados: {}*",
            date.format("%d/%m/%Y"),
            format_price(summary.total),
            format_price(summary.cash),
            format_price(summary.online),
            summary.count,
        );
        for service in services {
            text.push_str(&format!(
                "\n- {}: R${} ({})",
                service.name,
                format_price(service.price),
                service.payment_method
            ));
        }
        text
    }

    /// The full history report: a header line plus one `dd/mm/yy name method
    /// R$ price` row per service. Records whose date does not parse are left
    /// out; everything else round-trips through the import parser.
    pub fn report_text(&self, services: &[Service]) -> String {
        let mut text = String::from("Data Serviço Método Preço");
        for service in services {
            let Some(date) = service.parsed_date() else { continue };
            text.push_str(&format!(
                "\n{} {} {} R$ {}",
                date.format("%d/%m/%y"),
                service.name,
                service.payment_method,
                format_price(service.price),
            ));
        }
        text
    }

    /// Write the history report to the given directory, or to the Documents
    /// folder when none is given.
    pub fn export_to_path(
        &self,
        custom_path: Option<&str>,
        services: &[Service],
    ) -> Result<ExportToPathResult> {
        let export_dir = match custom_path {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path.trim()),
            _ => dirs::document_dir()
                .or_else(dirs::home_dir)
                .ok_or_else(|| anyhow::anyhow!("Could not determine export directory"))?,
        };

        let filename = format!("relatorio-flowbarber-{}.txt", Local::now().format("%Y%m%d"));
        let file_path = export_dir.join(&filename);

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResult {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
            });
        }

        match fs::write(&file_path, self.report_text(services)) {
            Ok(()) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!("Exported {} services to {}", services.len(), file_path);
                Ok(ExportToPathResult {
                    success: true,
                    message: format!("Relatório exportado para: {}", file_path),
                    file_path,
                })
            }
            Err(e) => {
                error!("Failed to write export file {:?}: {}", file_path, e);
                Ok(ExportToPathResult {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                })
            }
        }
    }
}

/// Two decimals with the Brazilian decimal comma: `30.0` renders `30,00`.
pub fn format_price(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}
