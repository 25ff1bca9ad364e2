use image::{Rgb, RgbImage};
use serde::Serialize;

use super::{GalleryModel, GallerySource};

const BACKGROUND: Rgb<u8> = Rgb([24, 24, 24]);
const FRAME: Rgb<u8> = Rgb([72, 72, 72]);
const SELECTED_FRAME: Rgb<u8> = Rgb([255, 170, 0]);
const LABEL_BAND: Rgb<u8> = Rgb([48, 48, 48]);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetCell {
    pub row: usize,
    pub col: usize,
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// Description of a rendered contact sheet, one entry per painted cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetLayout {
    pub title: String,
    pub rows: usize,
    pub columns: usize,
    pub cell_width: u32,
    pub cell_height: u32,
    pub zoom: u32,
    pub normalized: bool,
    pub cells: Vec<SheetCell>,
}

/// Paints the model's whole grid into one image. Empty and failed cells
/// keep the background colour.
pub fn render_sheet<S: GallerySource>(model: &mut GalleryModel<S>) -> (RgbImage, SheetLayout) {
    let cell = model.cell_size();
    let thumb = model.thumb_size();
    let border = model.border();
    let (rows, columns) = (model.row_count(), model.column_count());
    let mut canvas = RgbImage::from_pixel(
        columns as u32 * cell.width,
        rows as u32 * cell.height,
        BACKGROUND,
    );
    let mut cells = Vec::new();

    for row in 0..rows {
        for col in 0..columns {
            let Some(item) = model.get_value(row, col) else {
                continue;
            };
            let (x0, y0) = (col as u32 * cell.width, row as u32 * cell.height);
            let framed_height = thumb.height + border.vertical();
            let frame = if item.selected { SELECTED_FRAME } else { FRAME };
            fill(&mut canvas, x0, y0, cell.width, framed_height, frame);

            let pixels = item.to_gray8();
            for (x, y, pixel) in pixels.enumerate_pixels() {
                if x < thumb.width && y < thumb.height {
                    let value = pixel.0[0];
                    canvas.put_pixel(
                        x0 + border.left + x,
                        y0 + border.top + y,
                        Rgb([value, value, value]),
                    );
                }
            }
            if item.show_label {
                fill(
                    &mut canvas,
                    x0,
                    y0 + framed_height,
                    cell.width,
                    cell.height - framed_height,
                    LABEL_BAND,
                );
            }

            cells.push(SheetCell {
                row,
                col,
                index: item.index,
                label: item.label.clone(),
                selected: item.selected,
            });
        }
    }

    let layout = SheetLayout {
        title: model.title(),
        rows,
        columns,
        cell_width: cell.width,
        cell_height: cell.height,
        zoom: model.zoom(),
        normalized: model.is_normalized(),
        cells,
    };
    (canvas, layout)
}

fn fill(canvas: &mut RgbImage, x0: u32, y0: u32, width: u32, height: u32, colour: Rgb<u8>) {
    let x_end = (x0 + width).min(canvas.width());
    let y_end = (y0 + height).min(canvas.height());
    for y in y0..y_end {
        for x in x0..x_end {
            canvas.put_pixel(x, y, colour);
        }
    }
}
