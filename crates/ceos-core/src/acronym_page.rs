//! Extract candidate meanings from an acronym-service result page.
//!
//! Extraction is best-effort: a page without the results table, or rows
//! missing the expected cells, simply contribute no candidates.

use scraper::{ElementRef, Html, Selector};

use crate::types::AcronymMeaning;

/// Parse the result list of an acronym page, preserving service order.
pub fn parse_meanings(html: &str) -> Vec<AcronymMeaning> {
    let document = Html::parse_document(html);

    let table_sel = Selector::parse("table.table.table-striped.result-list").unwrap();
    let row_sel = Selector::parse("tbody > tr").unwrap();
    let rank_sel = Selector::parse("td.result-list__body__rank").unwrap();
    let meaning_sel = Selector::parse("td.result-list__body__meaning").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let Some(table) = document.select(&table_sel).next() else {
        tracing::debug!("no result table in acronym page");
        return Vec::new();
    };

    let mut meanings = Vec::new();
    for row in table.select(&row_sel) {
        let short_form = row
            .select(&rank_sel)
            .next()
            .and_then(|td| td.select(&link_sel).next())
            .map(element_text);
        let meaning = row
            .select(&meaning_sel)
            .next()
            .map(|td| meaning_text(td, &link_sel));

        match (short_form, meaning) {
            (Some(short_form), Some(meaning)) => {
                meanings.push(AcronymMeaning::new(short_form, meaning));
            }
            _ => tracing::warn!("skipping malformed acronym result row"),
        }
    }

    meanings
}

/// Link text when the cell holds exactly one link, the cell's own text otherwise.
fn meaning_text(td: ElementRef<'_>, link_sel: &Selector) -> String {
    let links: Vec<ElementRef<'_>> = td.select(link_sel).collect();
    if links.len() == 1 {
        element_text(links[0])
    } else {
        element_text(td)
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
