//! Example: label a synthetic mask and report per-component features.
//!
//! The labeling configuration is read from JSON, the way a tool would load
//! it from a file. Each component gets a random display color.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=ccl=debug cargo run -p ccl --example feature_extraction
//! ```

use anyhow::Context;
use ccl::{ArrayViewMut, Config, Labeler, random_color};
use common::setup_logging;
use common::test_utils::parse_grid;

const CONFIG_JSON: &str = r#"{
    "connectivity": 8,
    "foreground": 1,
    "background": 0,
    "features": 1023
}"#;

const IMAGE: [&str; 10] = [
    "..........######....",
    ".####.....#....#....",
    ".#..#.....#.##.#..#.",
    ".####.....#.##.#..#.",
    "..........#....#..#.",
    "...#......######..#.",
    "....#...............",
    ".....#.....#######..",
    "......#....#######..",
    "..............#.....",
];

fn main() -> anyhow::Result<()> {
    setup_logging("info");

    let config: Config<u8> =
        serde_json::from_str(CONFIG_JSON).context("Failed to parse labeling config")?;
    tracing::info!(features = ?config.features, connectivity = ?config.connectivity, "Loaded config");

    let (mut pixels, width, height) = parse_grid(&IMAGE);
    let mut labeler = Labeler::new(config)?;
    let mut view = ArrayViewMut::new(&mut pixels, width, height)?;
    let mut result = labeler.label_with_features(&mut view)?;
    tracing::info!(count = result.count, strategy = ?labeler.strategy(), "Labeling complete");

    for component in &mut result.components {
        component.set_fill_color(random_color());
        let centroid = component.centroid()?;
        tracing::info!(
            label = component.label(),
            area = component.area()?,
            bounding_box = ?component.bounding_box()?,
            centroid = format!("({:.2}, {:.2})", centroid.x, centroid.y),
            extent = format!("{:.3}", component.extent()?),
            contour_len = component.contour()?.len(),
            holes = component.inner_contours()?.len(),
            hull = ?component.convex_hull()?,
            color = ?component.fill_color(),
            "Component"
        );
    }

    for row in pixels.chunks(width) {
        let line: String = row
            .iter()
            .map(|&label| match label {
                0 => '.',
                l => char::from_digit(u32::from(l) % 36, 36).unwrap_or('?'),
            })
            .collect();
        println!("{line}");
    }

    Ok(())
}
