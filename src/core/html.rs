// src/core/html.rs
// Thin helpers over `scraper` for table-shaped pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// First `<table>` in document order, nested or not.
pub fn first_table(doc: &Html) -> Option<ElementRef<'_>> {
    doc.select(&TABLE).next()
}

/// Every `<tr>` under `table`, top to bottom, as its `<td>` texts.
/// Header cells (`<th>`) are not counted.
pub fn table_rows<'a>(table: ElementRef<'a>) -> impl Iterator<Item = Vec<String>> + 'a {
    table
        .select(&TR)
        .map(|tr| tr.select(&TD).map(cell_text).collect())
}

/// All descendant text of a cell, entities decoded, outer whitespace trimmed.
pub fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_first_table_only() {
        let doc = Html::parse_document(
            "<table id=a><tr><td>1</td></tr></table><table id=b><tr><td>2</td></tr></table>",
        );
        let t = first_table(&doc).unwrap();
        assert_eq!(t.value().attr("id"), Some("a"));
    }

    #[test]
    fn rows_keep_td_text_and_ignore_th() {
        let doc = Html::parse_document(
            "<table><tr><th>H</th><td> <b>Firm</b>  Name </td><td>A &amp; B</td></tr></table>",
        );
        let rows: Vec<_> = table_rows(first_table(&doc).unwrap()).collect();
        assert_eq!(rows, vec![vec![s!("Firm  Name"), s!("A & B")]]);
    }

    #[test]
    fn no_table_is_none() {
        let doc = Html::parse_document("<p>nothing here</p>");
        assert!(first_table(&doc).is_none());
    }
}
