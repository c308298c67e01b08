//! PDF encoding of laid-out pages.
//!
//! Text uses a non-embedded CID-keyed font under a UCS-2 CMap, so each
//! character becomes one big-endian 16-bit code. Characters above U+FFFF
//! have no code and fail the whole document with
//! [`ExportError::Unencodable`]; nothing is dropped silently here.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::info;

use crate::error::ExportError;
use crate::layout::{DrawOp, Page};
use crate::styles::DocumentStyles;

/// Resource name of the report font.
pub const FONT_RESOURCE: &str = "F1";

const PRODUCER: &str = "shujii";

/// Encode `line` as UCS-2 big-endian.
pub fn encode_ucs2(line: &str) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::with_capacity(line.len() * 2);
    for ch in line.chars() {
        let code = u16::try_from(u32::from(ch)).map_err(|_| ExportError::Unencodable {
            ch,
            line: line.to_string(),
        })?;
        out.extend_from_slice(&code.to_be_bytes());
    }
    Ok(out)
}

/// Write `pages` as a complete PDF document.
pub fn write_pdf(
    pages: &[Page],
    styles: &DocumentStyles,
    title: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");

    let font_id = add_font(&mut doc, styles);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FONT_RESOURCE => font_id
        }
    });

    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(page_count),
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(styles.page_width),
            Object::Real(styles.page_height)
        ]
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Producer" => Object::string_literal(PRODUCER)
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;

    info!(pages = page_count, bytes = bytes.len(), "PDF written");
    Ok(bytes)
}

fn page_content(page: &Page) -> Result<Content, ExportError> {
    let mut operations = Vec::with_capacity(page.ops.len() * 4);
    for op in &page.ops {
        match op {
            DrawOp::SetFont { size } => operations.push(Operation::new(
                "Tf",
                vec![Object::Name(FONT_RESOURCE.as_bytes().to_vec()), Object::Real(*size)],
            )),
            DrawOp::Text { x, y, text } => {
                let encoded = encode_ucs2(text)?;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Td", vec![Object::Real(*x), Object::Real(*y)]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::String(encoded, StringFormat::Hexadecimal)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
        }
    }
    Ok(Content { operations })
}

/// Register the Type0 font and its descendant. Returns the Type0 font id.
fn add_font(doc: &mut Document, styles: &DocumentStyles) -> ObjectId {
    let base_font = Object::Name(styles.font_name.as_bytes().to_vec());

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => base_font.clone(),
        "Flags" => Object::Integer(4),
        "FontBBox" => vec![
            Object::Integer(-92),
            Object::Integer(-250),
            Object::Integer(1010),
            Object::Integer(922)
        ],
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => Object::Integer(752),
        "Descent" => Object::Integer(-271),
        "CapHeight" => Object::Integer(737),
        "StemV" => Object::Integer(114)
    });

    // Proportional Latin CIDs 1-95 drawn half width, everything else full.
    let descendant_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType0",
        "BaseFont" => base_font,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Japan1"),
            "Supplement" => Object::Integer(2)
        },
        "FontDescriptor" => descriptor_id,
        "DW" => Object::Integer(1000),
        "W" => vec![Object::Integer(1), Object::Integer(95), Object::Integer(500)]
    });

    let type0_name = format!("{}-{}", styles.font_name, styles.font_encoding);
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(type0_name.into_bytes()),
        "Encoding" => Object::Name(styles.font_encoding.as_bytes().to_vec()),
        "DescendantFonts" => vec![Object::Reference(descendant_id)]
    })
}

/// A PDF text string: UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}
