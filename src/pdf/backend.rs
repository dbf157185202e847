//! A plotters backend that records PDF content-stream operations.
//!
//! Canvas coordinates are pixels with the origin at the top left; they are
//! scaled to points and flipped when each operation is emitted. The page is
//! handed to its [`PdfDocument`] on `present`.

use super::font::{encode_win_ansi, text_width_em, ASCENT, DESCENT};
use super::{PdfDocument, PdfPage, BOLD_FONT, REGULAR_FONT};
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};
use plotters_backend::{
    text_anchor, BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend,
    DrawingErrorKind, FontStyle, FontTransform,
};
use std::convert::Infallible;

// Control-point distance for a quarter circle drawn as a cubic Bezier
const KAPPA: f64 = 0.552_284_8;

/// Drawing backend for one page of a [`PdfDocument`].
pub struct PdfBackend<'a> {
    document: &'a mut PdfDocument,
    size: (u32, u32),
    scale: f64,
    page_height: f64,
    operations: Vec<Operation>,
    presented: bool,
}

impl<'a> PdfBackend<'a> {
    /// Start a page of `size` canvas pixels, scaled to the document's page.
    pub fn new(document: &'a mut PdfDocument, size: (u32, u32)) -> Self {
        let (page_width, page_height) = document.page_size();
        let scale = page_width / f64::from(size.0.max(1));
        let operations = vec![
            Operation::new("J", vec![1.into()]),
            Operation::new("j", vec![1.into()]),
        ];
        Self {
            document,
            size,
            scale,
            page_height,
            operations,
            presented: false,
        }
    }

    fn point(&self, (x, y): BackendCoord) -> (f64, f64) {
        (
            f64::from(x) * self.scale,
            self.page_height - f64::from(y) * self.scale,
        )
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn stroke_style<S: BackendStyle>(&mut self, style: &S) {
        let width = f64::from(style.stroke_width()) * self.scale;
        self.push("w", vec![real(width)]);
        self.push("RG", rgb(style.color()));
    }

    fn path(&mut self, points: &[BackendCoord]) {
        for (i, &p) in points.iter().enumerate() {
            let (x, y) = self.point(p);
            self.push(if i == 0 { "m" } else { "l" }, vec![real(x), real(y)]);
        }
    }

    fn rect(&mut self, upper_left: BackendCoord, bottom_right: BackendCoord) {
        let (x0, y0) = self.point((upper_left.0, bottom_right.1));
        let width = f64::from(bottom_right.0 - upper_left.0) * self.scale;
        let height = f64::from(bottom_right.1 - upper_left.1) * self.scale;
        self.push("re", vec![real(x0), real(y0), real(width), real(height)]);
    }
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        if !self.presented {
            let operations = std::mem::take(&mut self.operations);
            self.document.push_page(PdfPage::new(operations));
            self.presented = true;
        }
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if color.alpha == 0.0 {
            return Ok(());
        }
        self.push("rg", rgb(color));
        self.rect(point, (point.0 + 1, point.1 + 1));
        self.push("f", vec![]);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        self.stroke_style(style);
        self.path(&[from, to]);
        self.push("S", vec![]);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        if fill {
            self.push("rg", rgb(style.color()));
            self.rect(upper_left, bottom_right);
            self.push("f", vec![]);
        } else {
            self.stroke_style(style);
            self.rect(upper_left, bottom_right);
            self.push("S", vec![]);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<BackendCoord> = path.into_iter().collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.stroke_style(style);
        self.path(&points);
        self.push("S", vec![]);
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let (cx, cy) = self.point(center);
        let r = f64::from(radius.max(1)) * self.scale;
        let k = r * KAPPA;

        if fill {
            self.push("rg", rgb(style.color()));
        } else {
            self.stroke_style(style);
        }
        self.push("m", vec![real(cx + r), real(cy)]);
        let quarters = [
            [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
            [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
            [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
            [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
        ];
        for curve in quarters {
            self.push("c", curve.iter().map(|v| real(*v)).collect());
        }
        self.push(if fill { "f" } else { "S" }, vec![]);
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if style.color().alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<BackendCoord> = vert.into_iter().collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.push("rg", rgb(style.color()));
        self.path(&points);
        self.push("h", vec![]);
        self.push("f", vec![]);
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 || text.is_empty() {
            return Ok(());
        }

        let bold = matches!(style.style(), FontStyle::Bold);
        let size = style.size();
        let width = text_width_em(text, bold) * size;

        // Offset from the anchor to the start of the baseline, unrotated
        let dx = match style.anchor().h_pos {
            text_anchor::HPos::Left => 0.0,
            text_anchor::HPos::Center => -width / 2.0,
            text_anchor::HPos::Right => -width,
        };
        let dy = match style.anchor().v_pos {
            text_anchor::VPos::Top => ASCENT * size,
            text_anchor::VPos::Center => (ASCENT - 0.5) * size,
            text_anchor::VPos::Bottom => -DESCENT * size,
        };

        let transform = style.transform();
        let (ox, oy) = rotate(&transform, dx, dy);
        let start = (
            (f64::from(pos.0) + ox) * self.scale,
            self.page_height - (f64::from(pos.1) + oy) * self.scale,
        );
        let angle = match transform {
            FontTransform::None => 0.0_f64,
            FontTransform::Rotate90 => -90.0,
            FontTransform::Rotate180 => 180.0,
            FontTransform::Rotate270 => 90.0,
        }
        .to_radians();
        let (sin, cos) = (angle.sin(), angle.cos());

        let font = if bold { BOLD_FONT } else { REGULAR_FONT };
        self.push("BT", vec![]);
        self.push("Tf", vec![font.into(), real(size * self.scale)]);
        self.push("rg", rgb(color));
        self.push(
            "Tm",
            vec![
                real(cos),
                real(sin),
                real(-sin),
                real(cos),
                real(start.0),
                real(start.1),
            ],
        );
        self.push(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let bold = matches!(style.style(), FontStyle::Bold);
        let size = style.size();
        let width = text_width_em(text, bold) * size;
        Ok((width.ceil() as u32, size.ceil() as u32))
    }
}

/// Rotate a screen-space offset the way plotters rotates glyphs.
fn rotate(transform: &FontTransform, x: f64, y: f64) -> (f64, f64) {
    match transform {
        FontTransform::None => (x, y),
        FontTransform::Rotate90 => (-y, x),
        FontTransform::Rotate180 => (-x, -y),
        FontTransform::Rotate270 => (y, -x),
    }
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn rgb(color: BackendColor) -> Vec<Object> {
    let (r, g, b) = color.rgb;
    [r, g, b]
        .iter()
        .map(|c| real(f64::from(*c) / 255.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfDocument;
    use plotters::prelude::*;

    fn operators(page: &PdfPage) -> Vec<&str> {
        page.operations()
            .iter()
            .map(|op| op.operator.as_str())
            .collect()
    }

    #[test]
    fn test_present_pushes_one_page() {
        let mut doc = PdfDocument::new("unused.pdf", (460.8, 345.6));
        {
            let mut backend = PdfBackend::new(&mut doc, (640, 480));
            backend
                .draw_line((0, 0), (10, 10), &Color::stroke_width(&BLACK, 1))
                .expect("line");
            backend.present().expect("first present");
            backend.present().expect("second present");
        }
        assert_eq!(doc.page_count(), 1);
        let ops = operators(&doc.pages()[0]);
        assert!(ops.windows(3).any(|w| w == ["m", "l", "S"]));
        doc.discard();
    }

    #[test]
    fn test_transparent_shapes_are_skipped() {
        let mut doc = PdfDocument::new("unused.pdf", (100.0, 100.0));
        {
            let mut backend = PdfBackend::new(&mut doc, (100, 100));
            backend
                .draw_rect((0, 0), (5, 5), &TRANSPARENT, true)
                .expect("rect");
            backend.present().expect("present");
        }
        assert!(!operators(&doc.pages()[0]).contains(&"re"));
        doc.discard();
    }

    #[test]
    fn test_coordinates_flip_and_scale() {
        let mut doc = PdfDocument::new("unused.pdf", (50.0, 100.0));
        let backend = PdfBackend::new(&mut doc, (100, 200));
        let (x, y) = backend.point((10, 0));
        assert!((x - 5.0).abs() < 1e-9);
        assert!((y - 100.0).abs() < 1e-9);
        let (_, bottom) = backend.point((0, 200));
        assert!(bottom.abs() < 1e-9);
        drop(backend);
        doc.discard();
    }

    #[test]
    fn test_text_emits_string_and_matrix() {
        let mut doc = PdfDocument::new("unused.pdf", (100.0, 100.0));
        {
            let area = PdfBackend::new(&mut doc, (100, 100)).into_drawing_area();
            let style = ("sans-serif", 10).into_font().color(&BLACK);
            area.draw_text("1 KB", &style, (10, 10)).expect("text");
            area.present().expect("present");
        }
        let page = &doc.pages()[0];
        let shown: Vec<&Object> = page
            .operations()
            .iter()
            .filter(|op| op.operator == "Tj")
            .flat_map(|op| op.operands.iter())
            .collect();
        assert_eq!(shown.len(), 1);
        assert!(matches!(shown[0], Object::String(bytes, _) if bytes == b"1 KB"));
        assert!(operators(page).contains(&"Tm"));
        doc.discard();
    }

    #[test]
    fn test_text_is_win_ansi_encoded() {
        let mut doc = PdfDocument::new("unused.pdf", (100.0, 100.0));
        {
            let area = PdfBackend::new(&mut doc, (100, 100)).into_drawing_area();
            let style = ("sans-serif", 10).into_font().color(&BLACK);
            area.draw_text("lat_\u{b5}s", &style, (10, 10)).expect("text");
            area.present().expect("present");
        }
        let page = &doc.pages()[0];
        let bytes = page
            .operations()
            .iter()
            .filter(|op| op.operator == "Tj")
            .find_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .expect("shown string");
        assert_eq!(bytes, b"lat_\xb5s".to_vec());
        assert!(!bytes.contains(&0xC2));
        assert_eq!(page.texts(), vec!["lat_\u{b5}s".to_string()]);
        doc.discard();
    }

    #[test]
    fn test_text_size_estimate() {
        let mut doc = PdfDocument::new("unused.pdf", (100.0, 100.0));
        let area = PdfBackend::new(&mut doc, (100, 100)).into_drawing_area();
        let style = ("sans-serif", 10).into_font().into_text_style(&area);
        let (w, h) = area.estimate_text_size("00", &style).expect("estimate");
        assert_eq!((w, h), (12, 10));
        drop(area);
        doc.discard();
    }

    #[test]
    fn test_rotation_offsets() {
        assert_eq!(rotate(&FontTransform::None, 1.0, 2.0), (1.0, 2.0));
        assert_eq!(rotate(&FontTransform::Rotate90, 1.0, 2.0), (-2.0, 1.0));
        assert_eq!(rotate(&FontTransform::Rotate270, 1.0, 2.0), (2.0, -1.0));
    }
}
