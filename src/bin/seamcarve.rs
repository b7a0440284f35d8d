// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{crate_version, App, Arg, ArgMatches};
use failure::{format_err, Error};
use log::info;
use seamcarve::config::{parse_color, CarveConfig};
use seamcarve::{DeltaEstimator, SeamCarver, WidthDifference};
use std::process;

fn config_from(matches: &ArgMatches) -> Result<CarveConfig, Error> {
    let mut config = CarveConfig::default();
    if let Some(width) = matches.value_of("downsize-width") {
        config = config.with_downsize_width(width.parse()?);
    }
    if matches.is_present("no-downsize") {
        config = config.without_downsize();
    }
    if let Some(color) = matches.value_of("seam-color") {
        let color = parse_color(color)
            .ok_or_else(|| format_err!("seam color must be R,G,B, got {:?}", color))?;
        config = config.with_seam_color(color);
    }
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let carver = SeamCarver::new(config_from(matches)?);

    // Both are required, so clap has already seen to it that they exist.
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or_default();

    let image = image::open(input)?;

    if let Some(path) = matches.value_of("energy") {
        carver.energy_map(&image)?.save(path)?;
        info!("wrote energy map to {}", path);
    }
    if let Some(path) = matches.value_of("seams") {
        carver.seam_overlay(&image)?.save(path)?;
        info!("wrote seam overlay to {}", path);
    }

    let dx = match (matches.value_of("dx"), matches.value_of("reference")) {
        (Some(dx), _) => dx.parse::<i32>()?,
        (None, Some(reference)) => WidthDifference.estimate(&image, &image::open(reference)?),
        (None, None) => 0,
    };

    let carved = carver.carve(&image, dx)?;
    carved.save(output)?;
    info!(
        "wrote {}x{} image to {}",
        carved.width(),
        carved.height(),
        output
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware resizing with forward-energy seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the carved image")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("dx")
                .long("dx")
                .takes_value(true)
                .allow_hyphen_values(true)
                .help("Columns to add (positive) or remove (negative)"),
        )
        .arg(
            Arg::with_name("reference")
                .long("reference")
                .takes_value(true)
                .conflicts_with("dx")
                .help("Carve the input to the width of this image"),
        )
        .arg(
            Arg::with_name("no-downsize")
                .long("no-downsize")
                .help("Carve at full size, however wide the input is"),
        )
        .arg(
            Arg::with_name("downsize-width")
                .long("downsize-width")
                .takes_value(true)
                .help("Shrink inputs wider than this before carving [default: 500]"),
        )
        .arg(
            Arg::with_name("seam-color")
                .long("seam-color")
                .takes_value(true)
                .help("R,G,B colour for --seams [default: 200,200,255]"),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .takes_value(true)
                .help("Also write the forward-energy map to this file"),
        )
        .arg(
            Arg::with_name("seams")
                .long("seams")
                .takes_value(true)
                .help("Also write the cheapest seam, painted on the input, to this file"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("seamcarve: {}", e);
        process::exit(1);
    }
}
