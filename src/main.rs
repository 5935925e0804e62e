// main.rs
//
// Drafts a straight skirt with its waistband, hem and a patch pocket, adds
// seam allowances and writes the layout to svg/.

use draftrs::blocks::{RectangleDrafter, SkirtDrafter, WaistbandDrafter};
use draftrs::{DraftError, Measurements, Options, Pattern};
use std::fs;

#[cfg(feature = "svg-io")]
use draftrs::io::ToSVG;

fn main() -> Result<(), DraftError> {
    let measurements = Measurements::default();
    let options = Options {
        pockets: true,
        ..Options::default()
    };

    let mut pattern = Pattern::new("straight skirt");
    pattern.draft(&SkirtDrafter::new(measurements, options))?;
    pattern.draft(&WaistbandDrafter::new(measurements, options))?;
    pattern.draft(
        &RectangleDrafter::new("patch pocket", 14.0, 16.0)
            .quantity(2)
            .seam_allowance(options.seam_allowance),
    )?;
    pattern.add_hem("skirt back", "hem_cf", "hem_side", options.hem_width)?;

    for (name, error) in pattern.outline_failures() {
        println!("{name}: no outline ({error})");
    }

    #[cfg(feature = "offset")]
    let pattern = pattern.with_seam_allowances()?;

    for piece in pattern.pieces() {
        println!(
            "{:<16} {:>3} points {:>3} paths  cut {}{}",
            piece.name(),
            piece.points().len(),
            piece.paths().len(),
            piece.quantity(),
            if piece.cut_on_fold() { " on fold" } else { "" },
        );
    }

    // Ensure the /svg folder exists
    let _ = fs::create_dir_all("svg");

    #[cfg(feature = "svg-io")]
    if let Err(error) = pattern.write_svg("svg/straight_skirt.svg") {
        eprintln!("could not write svg/straight_skirt.svg: {error}");
    }

    Ok(())
}
