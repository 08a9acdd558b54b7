//! Best-effort parser for pasted report text.
//!
//! The report format is the one produced by the export surface: a header
//! line followed by one row per service, `dd/mm/yy <name> <method> R$
//! <price>`. Rows that fail date, method or price extraction are skipped
//! silently; there are no partial records. An unrecognized report yields an
//! empty list, not an error; the form boundary turns that into its single
//! validation message.

use crate::domain::commands::services::CreateServiceCommand;
use crate::domain::models::PaymentMethod;
use chrono::NaiveDate;
use log::debug;

const HEADER_COLUMNS: &str = "data serviço método preço";
const HEADER_TITLE: &str = "serviços realizados";

/// Extract service records from pasted report text.
pub fn parse_report(text: &str) -> Vec<CreateServiceCommand> {
    let lines: Vec<&str> = text.lines().collect();
    let Some(header) = find_header(&lines) else {
        debug!("No report header found in pasted text");
        return Vec::new();
    };

    let mut services = Vec::new();
    for line in &lines[header + 1..] {
        let line = line.trim();
        if line.chars().count() < 10 {
            continue;
        }
        if let Some(service) = parse_row(line) {
            services.push(service);
        }
    }
    debug!("Parsed {} services from report text", services.len());
    services
}

fn find_header(lines: &[&str]) -> Option<usize> {
    lines
        .iter()
        .position(|line| line.trim().to_lowercase().starts_with(HEADER_COLUMNS))
        .or_else(|| {
            lines
                .iter()
                .position(|line| line.trim().to_lowercase().starts_with(HEADER_TITLE))
        })
}

fn parse_row(line: &str) -> Option<CreateServiceCommand> {
    let (date, rest) = leading_date(line)?;

    // The rightmost payment keyword wins, so a service name that happens to
    // contain the other keyword does not confuse the split.
    let online_index = rest.rfind("pagamento online");
    let cash_index = rest.rfind("dinheiro");
    let (method_index, payment_method) = match (online_index, cash_index) {
        (Some(o), Some(c)) if o > c => (o, PaymentMethod::PagamentoOnline),
        (Some(o), None) => (o, PaymentMethod::PagamentoOnline),
        (_, Some(c)) => (c, PaymentMethod::Dinheiro),
        (None, None) => return None,
    };

    let name = rest[..method_index].trim();
    if name.is_empty() {
        return None;
    }

    let price = first_price(&rest[method_index..])?;

    Some(CreateServiceCommand {
        name: name.to_string(),
        price,
        payment_method,
        date: date.format("%Y-%m-%d").to_string(),
    })
}

/// A leading `dd/mm/yy` token followed by whitespace, plus the remainder of
/// the line.
fn leading_date(line: &str) -> Option<(NaiveDate, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 9 {
        return None;
    }
    let shaped = bytes[0].is_ascii_digit()
        && bytes[1].is_ascii_digit()
        && bytes[2] == b'/'
        && bytes[3].is_ascii_digit()
        && bytes[4].is_ascii_digit()
        && bytes[5] == b'/'
        && bytes[6].is_ascii_digit()
        && bytes[7].is_ascii_digit()
        && bytes[8].is_ascii_whitespace();
    if !shaped {
        return None;
    }
    let date = NaiveDate::parse_from_str(&line[..8], "%d/%m/%y").ok()?;
    Some((date, line[8..].trim()))
}

/// First `R$ <number>` in the text, with the Brazilian decimal comma
/// converted and thousands dots removed.
fn first_price(text: &str) -> Option<f64> {
    let currency = text.find("R$")?;
    let after = text[currency + 2..].trim_start();
    let raw: String = after
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if raw.is_empty() {
        return None;
    }
    raw.replace('.', "").replace(',', ".").parse::<f64>().ok()
}
