//! Report layer: turns selected records into a printable PDF shopping list.
//!
//! ```text
//!   &[PriceRecord] ──► layout::paginate ──► pdf::write_pdf ──► Vec<u8>
//!                                                               │
//!                                       delivery (file / data URI)
//! ```

pub mod delivery;
pub mod layout;
pub mod pdf;

use thiserror::Error;

use crate::data::model::PriceRecord;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Nothing was selected; the caller should ask the user to pick items.
    #[error("Select at least one item")]
    EmptySelection,
    #[error("PDF generation error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render `items`, in the given order, as a paginated PDF.
///
/// Refuses an empty list with [`ReportError::EmptySelection`] instead of
/// emitting a blank document.
pub fn render<'a, I>(items: I) -> Result<Vec<u8>, ReportError>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let lines: Vec<String> = items.into_iter().map(|rec| rec.to_string()).collect();
    if lines.is_empty() {
        return Err(ReportError::EmptySelection);
    }

    let item_count = lines.len();
    let pages = layout::paginate(lines);
    log::debug!("Rendering {item_count} items on {} pages", pages.len());

    pdf::write_pdf(&pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    fn items(n: usize) -> Vec<PriceRecord> {
        (0..n)
            .map(|i| record(&format!("Item {i}"), i as f64 * 1.5, "Aracaju", "SE"))
            .collect()
    }

    #[test]
    fn test_empty_selection_is_refused() {
        let empty: Vec<PriceRecord> = Vec::new();
        assert!(matches!(render(&empty), Err(ReportError::EmptySelection)));
    }

    #[test]
    fn test_renders_pdf_with_item_lines() {
        let mut rec = record("Rice", 3.2, "Aracaju", "SE");
        rec.brand = "Tio".into();
        rec.unit = "1kg".into();
        rec.place = "MarketA".into();

        let bytes = render([&rec]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "%%EOF"));
        assert!(contains(&bytes, "Rice | Tio | 1kg | price:3.20 | MarketA"));
        assert!(contains(&bytes, "Helvetica"));
    }

    #[test]
    fn test_escapes_and_unsupported_characters() {
        let mut rec = record("Coffee (strong) \\ dark", 9.9, "Aracaju", "SE");
        rec.place = "Loja €5".into();

        let bytes = render([&rec]).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(contains(&bytes, "%%EOF"));
        assert!(contains(&bytes, "strong"));
        assert!(contains(&bytes, "Loja ?5"));
        assert!(!contains(&bytes, "€"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let list = items(50);
        assert_eq!(render(&list).unwrap(), render(&list).unwrap());
    }

    #[test]
    fn test_order_matters() {
        let list = items(3);
        let reversed: Vec<&PriceRecord> = list.iter().rev().collect();
        assert_ne!(render(&list).unwrap(), render(reversed).unwrap());
    }

    #[test]
    fn test_size_grows_with_items() {
        let small = render(&items(1)).unwrap();
        let medium = render(&items(40)).unwrap();
        let large = render(&items(120)).unwrap();
        assert!(!small.is_empty());
        assert!(small.len() < medium.len());
        assert!(medium.len() < large.len());
    }

    #[test]
    fn test_selection_feeds_render() {
        use crate::data::model::{Catalog, Selection};

        let catalog = Catalog::from_records(items(5));
        let mut selection = Selection::default();
        assert!(matches!(
            render(selection.resolve(&catalog)),
            Err(ReportError::EmptySelection)
        ));

        selection.insert(3);
        selection.insert(1);
        let bytes = render(selection.resolve(&catalog)).unwrap();
        assert!(contains(&bytes, "Item 3"));
        assert!(contains(&bytes, "Item 1"));
        assert!(!contains(&bytes, "Item 2"));
    }
}
