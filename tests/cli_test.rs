//! End-to-end runs of the `pixelsmith` binary.

mod common;

use std::process::{Command, Output};

use pretty_assertions::assert_eq;

use common::{fixtures, TestWorkspace};

fn pixelsmith(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixelsmith"))
        .args(args)
        .env_remove("PIXELSMITH_CONFIG")
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run pixelsmith")
}

#[test]
fn test_info_json() {
    let ws = TestWorkspace::new();
    let input = ws.write("red.ppm", &fixtures::solid_red_ppm());

    let out = pixelsmith(&["info", input.to_str().unwrap(), "--json"]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["format"], "pnm");
    assert_eq!(json["pixel_format"], "rgb");
    assert_eq!(json["width"], 2);
    assert!(json["gamma"].is_null());
}

#[test]
fn test_convert_with_flags() {
    let ws = TestWorkspace::new();
    let input = ws.write("ramp.png", &fixtures::color_ramp_png(Some(1.0)));
    let output = ws.path("out.pgm");

    let out = pixelsmith(&[
        "convert",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--dither",
        "fs",
        "--depth",
        "1",
        "--resize",
        "4x4",
        "--scaling",
        "bc-splines",
        "--b",
        "0.333",
        "--c",
        "0.333",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("4x4"));
    let gray = common::assert_pnm(&ws.read("out.pgm"), "P5");
    common::assert_levels(&gray, 1);
}

#[test]
fn test_config_file_drives_defaults() {
    let ws = TestWorkspace::new();
    let config = ws.write("pixelsmith.yaml", fixtures::DITHER_CONFIG.as_bytes());
    let input = ws.write("ramp.png", &fixtures::color_ramp_png(Some(1.0)));
    let output = ws.path("out.png");

    let out = pixelsmith(&[
        "--config",
        config.to_str().unwrap(),
        "convert",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let png = common::assert_png(&ws.read("out.png"));
    common::assert_levels(&png, 1);
}

#[test]
fn test_gradient_command() {
    let ws = TestWorkspace::new();
    let output = ws.path("gradient.ppm");

    let out = pixelsmith(&[
        "gradient",
        output.to_str().unwrap(),
        "--width",
        "8",
        "--height",
        "2",
        "--rgb",
    ]);

    assert!(out.status.success());
    let rgb = common::assert_pnm(&ws.read("gradient.ppm"), "P6");
    assert_eq!((rgb.width(), rgb.height()), (8, 2));
    assert_eq!(&rgb.to_bytes()[..6], &[0, 0, 0, 32, 32, 32]);
}

#[test]
fn test_bad_input_fails() {
    let ws = TestWorkspace::new();
    let input = ws.write("junk.png", b"not an image");

    let out = pixelsmith(&["info", input.to_str().unwrap()]);

    assert!(!out.status.success());
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_rejects_unknown_dither() {
    let out = pixelsmith(&["convert", "a.png", "b.png", "--dither", "sparkle"]);
    assert!(!out.status.success());
}
