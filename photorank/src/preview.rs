//! Tiny previews of photos drawn with colored half blocks, two pixels per terminal cell.

use std::path::Path;

use image::{DynamicImage, ImageResult, Rgb, RgbImage};

const UPPER_HALF: char = '▀';
const RESET: &str = "\x1b[0m";

/// A rendered image, one string per terminal row
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    lines: Vec<String>,
    width: usize,
}

impl Preview {
    pub fn open(path: impl AsRef<Path>, columns: u32, rows: u32) -> ImageResult<Self> {
        let img = image::open(path)?;
        Ok(Self::render(&img, columns, rows))
    }

    /// Scales the image to fit inside `columns` x `rows` cells, keeping its aspect ratio
    pub fn render(img: &DynamicImage, columns: u32, rows: u32) -> Self {
        let thumb = img
            .thumbnail(columns.max(1), rows.max(1) * 2)
            .to_rgb8();
        Self::from_rgb(&thumb)
    }

    fn from_rgb(img: &RgbImage) -> Self {
        let mut lines = Vec::with_capacity(img.height().div_ceil(2) as usize);
        for y in (0..img.height()).step_by(2) {
            let mut line = String::new();
            for x in 0..img.width() {
                let Rgb([r, g, b]) = *img.get_pixel(x, y);
                line.push_str(&format!("\x1b[38;2;{r};{g};{b}m"));
                if y + 1 < img.height() {
                    let Rgb([r, g, b]) = *img.get_pixel(x, y + 1);
                    line.push_str(&format!("\x1b[48;2;{r};{g};{b}m"));
                }
                line.push(UPPER_HALF);
                line.push_str(RESET);
            }
            lines.push(line);
        }
        Self {
            lines,
            width: img.width() as usize,
        }
    }

    /// A box of text instead of a picture, e.g. when the photo can't be read
    pub fn placeholder(text: &str, columns: u32) -> Self {
        let width = columns as usize;
        let text: String = text.chars().take(width).collect();
        Self {
            width: text.chars().count(),
            lines: vec![text],
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Width in terminal cells
    pub fn width(&self) -> usize {
        self.width
    }
}

/// Puts two previews next to each other, `gap` cells apart
pub fn side_by_side(left: &Preview, right: &Preview, gap: usize) -> String {
    let height = left.lines.len().max(right.lines.len());
    let mut out = String::new();
    for i in 0..height {
        let l = left.lines.get(i).map(String::as_str).unwrap_or("");
        let pad = if left.lines.get(i).is_some() {
            gap
        } else {
            left.width + gap
        };
        out.push_str(l);
        out.push_str(&" ".repeat(pad));
        out.push_str(right.lines.get(i).map(String::as_str).unwrap_or(""));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn filled(width: u32, height: u32, red: u8, green: u8, blue: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([red, green, blue]))
    }

    #[test]
    fn two_pixels_per_cell() {
        let preview = Preview::from_rgb(&filled(3, 5, 255, 0, 0));
        assert_eq!(3, preview.width());
        assert_eq!(3, preview.lines().len());
        assert_eq!(3, preview.lines()[0].matches(UPPER_HALF).count());
        assert!(preview.lines()[0].contains("\x1b[38;2;255;0;0m\x1b[48;2;255;0;0m"));
        // the last row only has a top half
        assert!(!preview.lines()[2].contains("\x1b[48;2"));
    }

    #[test]
    fn fits_inside() {
        let img = DynamicImage::ImageRgb8(filled(300, 100, 0, 0, 255));
        let preview = Preview::render(&img, 30, 12);
        assert_eq!(30, preview.width());
        assert_eq!(5, preview.lines().len());

        let tall = DynamicImage::ImageRgb8(filled(100, 400, 0, 0, 255));
        let preview = Preview::render(&tall, 40, 10);
        assert!(preview.width() <= 40);
        assert_eq!(10, preview.lines().len());
    }

    #[test]
    fn pads_shorter_left() {
        let left = Preview::placeholder("gone", 10);
        let right = Preview::from_rgb(&filled(2, 4, 0, 0, 0));
        let out = side_by_side(&left, &right, 2);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(2, lines.len());
        assert!(lines[0].starts_with("gone  \x1b["));
        assert!(lines[1].starts_with("      \x1b["));
    }

    #[test]
    fn placeholder_is_cut() {
        let preview = Preview::placeholder("a very long error message", 6);
        assert_eq!(vec!["a very".to_owned()], preview.lines());
        assert_eq!(6, preview.width());
    }
}
