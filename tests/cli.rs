use assert_cmd::Command;
use image::{GenericImageView, Rgb, RgbImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn write_gradient(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 20) as u8, (y * 30) as u8, ((x + y) * 10) as u8])
    })
    .save(path)
    .unwrap();
}

fn seamcarve() -> Command {
    Command::cargo_bin("seamcarve").unwrap()
}

#[test]
fn removes_columns() {
    let dir = TempDir::new().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    write_gradient(&input, 8, 5);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .arg("--dx=-3")
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().dimensions(), (5, 5));
}

#[test]
fn inserts_columns() {
    let dir = TempDir::new().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    write_gradient(&input, 6, 4);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .args(&["--dx", "4"])
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().dimensions(), (10, 4));
}

#[test]
fn matches_a_reference_width() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let reference = dir.path().join("ref.png");
    let output = dir.path().join("out.png");
    write_gradient(&input, 9, 4);
    write_gradient(&reference, 7, 2);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .arg("--reference")
        .arg(&reference)
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().dimensions(), (7, 4));
}

#[test]
fn downsizes_wide_inputs() {
    let dir = TempDir::new().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    write_gradient(&input, 12, 6);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .args(&["--downsize-width", "6", "--dx=-1"])
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().dimensions(), (5, 3));
}

#[test]
fn writes_diagnostics() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.png");
    let output = dir.path().join("out.png");
    let energy = dir.path().join("energy.png");
    let seams = dir.path().join("seams.png");
    write_gradient(&input, 6, 4);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .arg("--energy")
        .arg(&energy)
        .arg("--seams")
        .arg(&seams)
        .args(&["--seam-color", "255,0,0"])
        .assert()
        .success();

    assert_eq!(image::open(&energy).unwrap().dimensions(), (6, 4));
    let painted = image::open(&seams).unwrap().to_rgb8();
    assert!(painted.pixels().any(|p| *p == Rgb([255, 0, 0])));
    assert_eq!(image::open(&output).unwrap().dimensions(), (6, 4));
}

#[test]
fn refuses_to_carve_everything_away() {
    let dir = TempDir::new().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    write_gradient(&input, 4, 4);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .arg("--dx=-4")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot carve a 4x4 image by -4 columns"));

    assert!(!output.exists());
}

#[test]
fn rejects_bad_colors() {
    let dir = TempDir::new().unwrap();
    let (input, output) = (dir.path().join("in.png"), dir.path().join("out.png"));
    write_gradient(&input, 4, 4);

    seamcarve()
        .arg(&input)
        .arg(&output)
        .args(&["--seam-color", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("seam color"));
}
