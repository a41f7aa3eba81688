//! The scrape pipeline: fetch the registry table, resolve agencies, emit JSON.

use ceos_core::{parse_agencies, MissionRecord, MissionTable, ScrapeResult, AGENCY_COLUMN};

use crate::clients::{AcronymLookup, MissionPageClient};
use crate::prompt::Prompter;
use crate::resolver::AcronymResolver;

/// Fetch every mission and annotate it with canonical agency names.
pub async fn scrape<L: AcronymLookup, P: Prompter>(
    client: &MissionPageClient,
    resolver: &mut AcronymResolver<L, P>,
) -> ScrapeResult<Vec<MissionRecord>> {
    let tokens = client.form_tokens().await?;
    tracing::debug!("obtained form tokens from {}", client.url());

    let table = client.fetch_table(&tokens).await?;
    annotate(table, resolver).await
}

/// Turn raw table rows into records, resolving each listed agency in order.
pub async fn annotate<L: AcronymLookup, P: Prompter>(
    table: MissionTable,
    resolver: &mut AcronymResolver<L, P>,
) -> ScrapeResult<Vec<MissionRecord>> {
    let MissionTable { headers, rows } = table;
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let mut record = MissionRecord::new();
        for (header, cell) in headers.iter().zip(row) {
            if header == AGENCY_COLUMN {
                let acronyms = parse_agencies(cell.as_deref());
                let mut names = Vec::with_capacity(acronyms.len());
                for acronym in &acronyms {
                    names.push(resolver.resolve(acronym).await?);
                }
                record.push_agencies(header.as_str(), acronyms, names);
            } else {
                record.push_text(header.as_str(), cell);
            }
        }
        records.push(record);
    }

    tracing::info!("scraped {} missions", records.len());
    Ok(records)
}

/// Pretty-printed JSON array, two-space indented.
pub fn render_json(records: &[MissionRecord]) -> ScrapeResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
