//! Tests for PNG preview rendering and export

#[cfg(test)]
mod tests {
    use image::Rgba;
    use sockettile::io::configuration::{ORIENTATION_SHADE, UNSET_COLOR};
    use sockettile::io::image::{export_grid_as_png, marked_edge, render_grid};
    use sockettile::io::tileset::Palette;
    use sockettile::tiles::{Prototype, Sides};
    use sockettile::{Direction, Rotation, TileCollapse};

    const BASE: [u8; 4] = [200, 100, 0, 255];

    fn shaded() -> Rgba<u8> {
        let darken = |channel: u8| (f32::from(channel) * ORIENTATION_SHADE) as u8;
        Rgba([darken(BASE[0]), darken(BASE[1]), darken(BASE[2]), BASE[3]])
    }

    // One cell per orientation: A at (0,0), A_1 at (1,0), A_2 at (0,1), A_3 at (1,1)
    fn rotated_square() -> (TileCollapse, Palette) {
        let mut solver = TileCollapse::new(2, 2).unwrap();
        let tile = Prototype::new("A", Sides::parse("0s", "0s", "0s", "0s"));
        solver.add_prototypes(tile.rotate_360()).unwrap();
        solver.set(0, 0, &["A"]).unwrap();
        solver.set(1, 0, &["A_1"]).unwrap();
        solver.set(0, 1, &["A_2"]).unwrap();
        solver.set(1, 1, &["A_3"]).unwrap();
        let mut palette = Palette::default();
        palette.insert("A", BASE);
        (solver, palette)
    }

    #[test]
    fn test_marked_edge() {
        assert_eq!(marked_edge(Rotation::None), Direction::Top);
        assert_eq!(marked_edge(Rotation::Right), Direction::Right);
        assert_eq!(marked_edge(Rotation::Half), Direction::Bottom);
        assert_eq!(marked_edge(Rotation::Left), Direction::Left);
    }

    // Tests y-flip and orientation shading per rotation
    // Verified by drawing rows without flipping
    #[test]
    fn test_render_orientation() {
        let (solver, palette) = rotated_square();
        let img = render_grid(&solver, &palette, 4).unwrap();
        assert_eq!(img.dimensions(), (8, 8));

        // (0,0) occupies the lower-left block, marked on its top row
        assert_eq!(*img.get_pixel(1, 4), shaded());
        assert_eq!(*img.get_pixel(1, 5), Rgba(BASE));
        // (1,0) marked on its right column
        assert_eq!(*img.get_pixel(7, 5), shaded());
        assert_eq!(*img.get_pixel(5, 5), Rgba(BASE));
        // (0,1) upper-left, marked on its bottom row
        assert_eq!(*img.get_pixel(1, 3), shaded());
        assert_eq!(*img.get_pixel(1, 0), Rgba(BASE));
        // (1,1) marked on its left column
        assert_eq!(*img.get_pixel(4, 1), shaded());
        assert_eq!(*img.get_pixel(6, 1), Rgba(BASE));
    }

    #[test]
    fn test_unset_cells_transparent() {
        let mut solver = TileCollapse::new(1, 1).unwrap();
        solver
            .add_prototypes([
                Prototype::new("A", Sides::parse("0s", "0s", "0s", "0s")),
                Prototype::new("B", Sides::parse("0s", "0s", "0s", "0s")),
            ])
            .unwrap();
        let img = render_grid(&solver, &Palette::default(), 2).unwrap();
        assert!(img.pixels().all(|pixel| *pixel == Rgba(UNSET_COLOR)));
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let (solver, palette) = rotated_square();
        assert!(render_grid(&solver, &palette, 0).is_err());
    }

    #[test]
    fn test_export_creates_file() {
        let (solver, palette) = rotated_square();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("previews").join("square.png");
        export_grid_as_png(&solver, &palette, 3, &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (6, 6));
    }
}
