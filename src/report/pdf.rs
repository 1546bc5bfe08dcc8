use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::layout::{Page, PAGE_HEIGHT, PAGE_WIDTH};
use super::ReportError;

/// Serialize laid-out pages into a PDF byte buffer.
///
/// Content streams are left uncompressed and no dates or IDs are written, so
/// equal pages always give equal bytes.
pub fn write_pdf(pages: &[Page]) -> Result<Vec<u8>, ReportError> {
    let mut document = Document::with_version("1.5");
    let pages_id = document.new_object_id();

    let font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page);
        let content_id = document.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    document.save_to(&mut buf)?;
    Ok(buf)
}

fn page_content(page: &Page) -> Content {
    let mut operations = Vec::with_capacity(page.lines.len() * 5);
    for line in &page.lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), line.font_size.into()]));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(&line.text), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Helvetica is used with WinAnsiEncoding; Latin-1 maps directly, anything
/// else becomes `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| if c as u32 <= 255 { c as u8 } else { b'?' })
        .collect()
}
