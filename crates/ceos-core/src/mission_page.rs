//! Parse the CEOS registry page: anti-forgery tokens, the "show all" form,
//! and the mission table itself.

use scraper::{ElementRef, Html, Selector};

use crate::types::{FormTokens, ScrapeError, ScrapeResult};

/// Cell content the registry uses for "no data".
pub const NO_DATA: &str = "\u{a0}";

/// Header names plus raw cell values for every data row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Pull `__VIEWSTATE` and `__EVENTVALIDATION` out of the landing page.
pub fn extract_form_tokens(html: &str) -> ScrapeResult<FormTokens> {
    let document = Html::parse_document(html);
    Ok(FormTokens {
        view_state: hidden_input_value(&document, "__VIEWSTATE")?,
        event_validation: hidden_input_value(&document, "__EVENTVALIDATION")?,
    })
}

fn hidden_input_value(document: &Html, id: &str) -> ScrapeResult<String> {
    let sel = Selector::parse(&format!("input#{id}"))
        .map_err(|e| ScrapeError::Structure(format!("bad selector for {id}: {e:?}")))?;
    let input = document
        .select(&sel)
        .next()
        .ok_or_else(|| ScrapeError::Structure(format!("missing input #{id}")))?;
    input
        .value()
        .attr("value")
        .map(|v| v.to_string())
        .ok_or_else(|| ScrapeError::Structure(format!("input #{id} has no value")))
}

/// Form fields that ask the registry for every mission, unfiltered.
pub fn show_all_form(tokens: &FormTokens) -> Vec<(String, String)> {
    let fields: [(&str, &str); 16] = [
        ("ddlAgency", "All"),
        ("ddlDisplayResults", "All"),
        ("ddlEOLYearFilterType", "All"),
        ("ddlLaunchYearFiltertype", "All"),
        ("ddlMissionStatus", "All"),
        ("ddlRepeatCycleFilter", "All"),
        ("tbApplications", ""),
        ("tbInstruments", ""),
        ("tbMission", ""),
        ("btExportToExcel", ""),
        ("__VIEWSTATE", &tokens.view_state),
        ("__EVENTVALIDATION", &tokens.event_validation),
        ("__EVENTTARGET", ""),
        ("__EVENTARGUMENT", ""),
        ("__LASTFOCUS", ""),
        ("__VIEWSTATEENCRYPTED", ""),
    ];
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Parse the mission table out of the "show all" response.
///
/// The first row with header cells names the fields; every later row is
/// read positionally against it. Short rows leave trailing fields absent and
/// extra cells are dropped.
pub fn parse_mission_table(html: &str) -> ScrapeResult<MissionTable> {
    let document = Html::parse_document(html);
    let tr_sel = Selector::parse("tr").unwrap();

    let mut rows = document.select(&tr_sel);
    let header_row = rows
        .by_ref()
        .find(|tr| child_cells(*tr, "th").next().is_some())
        .ok_or_else(|| ScrapeError::Structure("mission table has no header row".into()))?;

    let headers: Vec<String> = child_cells(header_row, "th")
        .map(|th| th.text().collect::<String>().trim().to_string())
        .collect();

    let mut table = MissionTable {
        headers,
        rows: Vec::new(),
    };

    for tr in rows {
        let cells: Vec<Option<String>> = child_cells(tr, "td")
            .map(|td| normalize_cell(&td.text().collect::<String>()))
            .collect();
        if cells.is_empty() {
            continue;
        }
        if cells.len() > table.headers.len() {
            tracing::debug!(
                "row has {} cells for {} headers; extra cells dropped",
                cells.len(),
                table.headers.len()
            );
        }
        table
            .rows
            .push(cells.into_iter().take(table.headers.len()).collect());
    }

    tracing::info!(
        "parsed mission table: {} columns, {} rows",
        table.headers.len(),
        table.rows.len()
    );
    Ok(table)
}

/// A lone non-breaking space means "no data"; anything else is kept with
/// ASCII whitespace trimmed. U+00A0 is never trimmed away.
pub fn normalize_cell(text: &str) -> Option<String> {
    let text = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if text == NO_DATA {
        None
    } else {
        Some(text.to_string())
    }
}

fn child_cells<'a>(tr: ElementRef<'a>, tag: &'static str) -> impl Iterator<Item = ElementRef<'a>> {
    tr.children()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LANDING: &str = r#"<html><body><form method="post" action="./missiontable.aspx">
        <input type="hidden" name="__VIEWSTATE" id="__VIEWSTATE" value="dDwtMTA4NzI" />
        <input type="hidden" name="__EVENTVALIDATION" id="__EVENTVALIDATION" value="/wEWAgKU" />
        </form></body></html>"#;

    #[test]
    fn test_extract_form_tokens() {
        let tokens = extract_form_tokens(LANDING).unwrap();
        assert_eq!(tokens.view_state, "dDwtMTA4NzI");
        assert_eq!(tokens.event_validation, "/wEWAgKU");
    }

    #[test]
    fn test_missing_token_is_structure_error() {
        let html = r#"<html><body><input id="__VIEWSTATE" value="x" /></body></html>"#;
        let err = extract_form_tokens(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Structure(ref m) if m.contains("__EVENTVALIDATION")));
    }

    #[test]
    fn test_show_all_form_echoes_tokens() {
        let tokens = FormTokens {
            view_state: "vs".into(),
            event_validation: "ev".into(),
        };
        let form = show_all_form(&tokens);
        assert_eq!(form.len(), 16);
        assert_eq!(form[0], ("ddlAgency".to_string(), "All".to_string()));
        assert!(form.contains(&("__VIEWSTATE".to_string(), "vs".to_string())));
        assert!(form.contains(&("__EVENTVALIDATION".to_string(), "ev".to_string())));
        assert!(form.contains(&("tbMission".to_string(), String::new())));
    }

    #[test]
    fn test_parse_table_positional() {
        let html = r#"<table>
            <tr><th>Mission Name</th><th>Mission Agencies</th><th>Launch Date</th></tr>
            <tr><td>Aqua</td><td>NASA</td><td>May 2002</td></tr>
            <tr><td>Sentinel-1A</td><td>ESA</td></tr>
            </table>"#;

        let table = parse_mission_table(html).unwrap();
        assert_eq!(
            table.headers,
            vec!["Mission Name", "Mission Agencies", "Launch Date"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][2].as_deref(), Some("May 2002"));
        // Short row: trailing field absent, not padded.
        assert_eq!(table.rows[1].len(), 2);
    }

    #[test]
    fn test_nbsp_cell_is_null() {
        let html = "<table><tr><th>A</th><th>B</th></tr>\
                    <tr><td>&nbsp;</td><td></td></tr></table>";

        let table = parse_mission_table(html).unwrap();
        assert_eq!(table.rows[0][0], None);
        assert_eq!(table.rows[0][1], Some(String::new()));
    }

    #[test]
    fn test_padded_nbsp_cell_is_null() {
        let html = "<table><tr><th>A</th><th>B</th><th>C</th></tr>\
                    <tr><td>&nbsp; </td><td>\n&nbsp;\n</td><td>&nbsp;x</td></tr></table>";

        let table = parse_mission_table(html).unwrap();
        assert_eq!(
            table.rows[0],
            vec![None, None, Some("\u{a0}x".to_string())]
        );
    }

    #[test]
    fn test_extra_cells_dropped() {
        let html = "<table><tr><th>A</th></tr><tr><td>1</td><td>2</td></tr></table>";
        let table = parse_mission_table(html).unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string())]);
    }

    #[test]
    fn test_missing_header_row() {
        let html = "<table><tr><td>orphan</td></tr></table>";
        assert!(matches!(
            parse_mission_table(html),
            Err(ScrapeError::Structure(_))
        ));
    }

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell("\u{a0}"), None);
        assert_eq!(normalize_cell("  ESA \n"), Some("ESA".to_string()));
        assert_eq!(normalize_cell(""), Some(String::new()));
        assert_eq!(normalize_cell("\u{a0} "), None);
        assert_eq!(normalize_cell("\u{a0}\u{a0}"), Some("\u{a0}\u{a0}".to_string()));
    }
}
