//! PDF assembly from laid-out pages.

use super::loader::{ImageData, LoadedImage};
use super::paint::{DrawCommand, FontWeight, PageCommands};
use crate::{Error, PageSize, Result};
use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

const PT_PER_MM: f32 = 72.0 / 25.4;

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

fn mm(v: f32) -> f32 {
    v * PT_PER_MM
}

/// WinAnsi bytes for `text`; characters outside Latin-1 become '?'.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn check_len(what: &str, actual: usize, expected: usize, img: &LoadedImage) -> Result<()> {
    if actual != expected {
        return Err(Error::RenderError(format!(
            "{} buffer holds {} bytes, expected {} for {}x{}",
            what, actual, expected, img.width, img.height
        )));
    }
    Ok(())
}

/// Embed one image XObject. JPEG streams go in untouched under DCTDecode;
/// raw pixels are deflated, with any alpha plane attached as a soft mask.
fn embed_image(pdf: &mut Pdf, alloc: &mut impl FnMut() -> Ref, img: &LoadedImage) -> Result<Ref> {
    let pixels = img.width as usize * img.height as usize;
    let xobj_ref = alloc();

    match &img.data {
        ImageData::Jpeg { bytes, grayscale } => {
            let mut xobj = pdf.image_xobject(xobj_ref, bytes);
            xobj.filter(Filter::DctDecode);
            xobj.width(img.width as i32);
            xobj.height(img.height as i32);
            if *grayscale {
                xobj.color_space().device_gray();
            } else {
                xobj.color_space().device_rgb();
            }
            xobj.bits_per_component(8);
        }
        ImageData::Raw { rgb, alpha } => {
            check_len("pixel", rgb.len(), pixels * 3, img)?;
            let smask_ref = match alpha {
                Some(alpha) => {
                    check_len("alpha", alpha.len(), pixels, img)?;
                    let mask_ref = alloc();
                    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                    let mut mask = pdf.image_xobject(mask_ref, &compressed);
                    mask.filter(Filter::FlateDecode);
                    mask.width(img.width as i32);
                    mask.height(img.height as i32);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                }
                None => None,
            };

            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(rgb, 6);
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(img.width as i32);
            xobj.height(img.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
        }
    }
    Ok(xobj_ref)
}

/// Write `pages` as a PDF. Each image is embedded once and referenced from
/// the pages that draw it.
pub fn render(pages: &[PageCommands], images: &[LoadedImage], size: PageSize) -> Result<Vec<u8>> {
    if pages.is_empty() {
        return Err(Error::RenderError("document has no pages".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let regular_id = alloc();
    let bold_id = alloc();

    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let mut image_refs = Vec::with_capacity(images.len());
    for img in images {
        image_refs.push(embed_image(&mut pdf, &mut alloc, img)?);
    }

    let page_height = mm(size.height_mm);
    let mut page_ids = Vec::with_capacity(pages.len());

    for page in pages {
        let page_id = alloc();
        let content_id = alloc();
        page_ids.push(page_id);

        let mut content = Content::new();
        for cmd in &page.commands {
            match cmd {
                DrawCommand::Text { x, y, size, weight, text } => {
                    let font = match weight {
                        FontWeight::Regular => REGULAR_FONT,
                        FontWeight::Bold => BOLD_FONT,
                    };
                    let bytes = encode_text(text);
                    content
                        .begin_text()
                        .set_font(Name(font), *size)
                        .next_line(mm(*x), page_height - mm(*y))
                        .show(Str(&bytes))
                        .end_text();
                }
                DrawCommand::Image { image, rect } => {
                    if *image >= image_refs.len() {
                        return Err(Error::RenderError(format!("unknown image index {}", image)));
                    }
                    let name = image_name(*image);
                    let (w, h) = (mm(rect.width), mm(rect.height));
                    let bottom = page_height - mm(rect.y) - h;
                    content
                        .save_state()
                        .transform([w, 0.0, 0.0, h, mm(rect.x), bottom])
                        .x_object(Name(name.as_bytes()))
                        .restore_state();
                }
            }
        }

        let raw = content.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let mut writer = pdf.page(page_id);
        writer
            .media_box(Rect::new(0.0, 0.0, mm(size.width_mm), page_height))
            .parent(pages_id)
            .contents(content_id);
        {
            let mut resources = writer.resources();
            {
                let mut fonts = resources.fonts();
                fonts.pair(Name(REGULAR_FONT), regular_id);
                fonts.pair(Name(BOLD_FONT), bold_id);
            }
            let used: Vec<usize> = page.image_indices().collect();
            if !used.is_empty() {
                let names: Vec<String> = used.iter().map(|i| image_name(*i)).collect();
                let mut xobjects = resources.x_objects();
                for (name, i) in names.iter().zip(&used) {
                    xobjects.pair(Name(name.as_bytes()), image_refs[*i]);
                }
            }
        }
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);

    Ok(pdf.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::paint::MmRect;

    fn tiny_image() -> LoadedImage {
        LoadedImage::from_rgb(2, 2, vec![0; 12])
    }

    fn single_image_page() -> PageCommands {
        PageCommands {
            commands: vec![DrawCommand::Image {
                image: 0,
                rect: MmRect { x: 20.0, y: 20.0, width: 50.0, height: 50.0 },
            }],
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn renders_pdf_with_header_bytes() {
        let page = PageCommands {
            commands: vec![
                DrawCommand::Text {
                    x: 10.0,
                    y: 20.0,
                    size: 24.0,
                    weight: FontWeight::Regular,
                    text: "Model Portfolio".into(),
                },
                DrawCommand::Image {
                    image: 0,
                    rect: MmRect { x: 20.0, y: 55.0, width: 100.0, height: 100.0 },
                },
            ],
        };
        let bytes = render(&[page], &[tiny_image()], PageSize::A4).expect("render");
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn rejects_unknown_image_index() {
        let page = PageCommands {
            commands: vec![DrawCommand::Image {
                image: 3,
                rect: MmRect { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            }],
        };
        assert!(render(&[page], &[], PageSize::A4).is_err());
    }

    #[test]
    fn rejects_truncated_pixel_buffer() {
        let bad = LoadedImage::from_rgb(4, 4, vec![0; 5]);
        assert!(render(&[PageCommands::default()], &[bad], PageSize::A4).is_err());

        let short_mask = LoadedImage {
            width: 2,
            height: 1,
            data: ImageData::Raw { rgb: vec![0; 6], alpha: Some(vec![0]) },
        };
        assert!(render(&[PageCommands::default()], &[short_mask], PageSize::A4).is_err());
    }

    #[test]
    fn jpeg_is_embedded_verbatim() {
        let stream = b"\xFF\xD8jpeg-payload-marker\xFF\xD9".to_vec();
        let img = LoadedImage {
            width: 16,
            height: 9,
            data: ImageData::Jpeg { bytes: stream.clone(), grayscale: false },
        };
        let bytes = render(&[single_image_page()], &[img], PageSize::A4).unwrap();
        assert!(contains(&bytes, &stream));
        assert!(contains(&bytes, b"/DCTDecode"));
        assert!(!contains(&bytes, b"/SMask"));
    }

    #[test]
    fn alpha_becomes_soft_mask() {
        let img = LoadedImage {
            width: 2,
            height: 1,
            data: ImageData::Raw { rgb: vec![9; 6], alpha: Some(vec![255, 0]) },
        };
        let bytes = render(&[single_image_page()], &[img], PageSize::A4).unwrap();
        assert!(contains(&bytes, b"/SMask"));
        assert!(contains(&bytes, b"/DeviceGray"));
        assert!(!contains(&bytes, b"/DCTDecode"));
    }

    #[test]
    fn encodes_latin1_and_replaces_the_rest() {
        assert_eq!(encode_text("Café"), b"Caf\xe9".to_vec());
        assert_eq!(encode_text("Обо"), b"???".to_vec());
    }
}
