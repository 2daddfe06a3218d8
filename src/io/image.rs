//! PNG preview of a solved grid
//!
//! One square block per cell, `+y` drawn upward. The edge the base tile's top
//! side now faces is shaded to show the rotation.

use crate::algorithm::executor::TileCollapse;
use crate::io::configuration::{ORIENTATION_SHADE, UNSET_COLOR};
use crate::io::error::{Result, TileError, file_system_error, invalid_parameter};
use crate::io::tileset::Palette;
use crate::spatial::Direction;
use crate::tiles::Rotation;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Side of the cell the base orientation's top edge faces after rotation
pub const fn marked_edge(rotation: Rotation) -> Direction {
    match rotation {
        Rotation::None => Direction::Top,
        Rotation::Right => Direction::Right,
        Rotation::Half => Direction::Bottom,
        Rotation::Left => Direction::Left,
    }
}

fn shade(color: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = color;
    let darken = |channel: u8| (f32::from(channel) * ORIENTATION_SHADE) as u8;
    [darken(r), darken(g), darken(b), a]
}

/// Whether pixel `(px, py)` inside a cell lies on the strip along `edge`
///
/// `py` counts downward from the top of the cell.
const fn on_edge(edge: Direction, px: u32, py: u32, cell_size: u32, thickness: u32) -> bool {
    match edge {
        Direction::Top => py < thickness,
        Direction::Bottom => py + thickness >= cell_size,
        Direction::Left => px < thickness,
        Direction::Right => px + thickness >= cell_size,
    }
}

/// Render the solver's current results
///
/// # Errors
///
/// Returns an error if the cell size is zero or the image would exceed
/// `u32` pixel dimensions
pub fn render_grid(solver: &TileCollapse, palette: &Palette, cell_size: u32) -> Result<RgbaImage> {
    if cell_size == 0 {
        return Err(invalid_parameter("cell_size", &cell_size, &"must be positive"));
    }
    let to_pixels = |cells: usize| {
        u32::try_from(cells)
            .ok()
            .and_then(|cells| cells.checked_mul(cell_size))
            .ok_or_else(|| invalid_parameter("cell_size", &cell_size, &"image too large"))
    };
    let width_px = to_pixels(solver.width())?;
    let height_px = to_pixels(solver.height())?;
    let thickness = (cell_size / 4).max(1);

    let mut img: RgbaImage = ImageBuffer::from_pixel(width_px, height_px, Rgba(UNSET_COLOR));
    let height = solver.height();

    for (index, tile) in solver.results().iter().enumerate() {
        let Some(id) = tile else {
            continue;
        };
        let (x, y) = (index / height, index % height);
        let (color, rotation) = palette.lookup(id);
        let edge = marked_edge(rotation);
        let origin_x = x as u32 * cell_size;
        let origin_y = (height - 1 - y) as u32 * cell_size;

        for py in 0..cell_size {
            for px in 0..cell_size {
                let pixel = if on_edge(edge, px, py, cell_size, thickness) {
                    shade(color)
                } else {
                    color
                };
                img.put_pixel(origin_x + px, origin_y + py, Rgba(pixel));
            }
        }
    }

    Ok(img)
}

/// Render and save the results as PNG
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_grid`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    solver: &TileCollapse,
    palette: &Palette,
    cell_size: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(solver, palette, cell_size)?;

    if let Some(parent) = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .map_err(|source| file_system_error(parent, "create directory", source))?;
    }

    img.save(output_path).map_err(|source| TileError::ImageExport {
        path: output_path.to_path_buf(),
        source,
    })
}
