extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use std::str;

/// Pulls a binary PPM apart: magic, width, height, maxval, then the
/// raw pixel payload after the single whitespace byte that terminates
/// the header.  Whitespace-agnostic so the test does not care exactly
/// how the encoder formats its header.
fn ppm(bytes: &[u8]) -> (u32, u32, Vec<u8>) {
    let mut fields: Vec<String> = Vec::new();
    let mut i = 0;
    while fields.len() < 4 {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        assert!(start < i, "truncated PPM header");
        fields.push(str::from_utf8(&bytes[start..i]).unwrap().to_string());
    }
    i += 1;
    assert_eq!(fields[0], "P6");
    assert_eq!(fields[3], "255");
    (
        fields[1].parse().unwrap(),
        fields[2].parse().unwrap(),
        bytes[i..].to_vec(),
    )
}

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

#[test]
fn default_render_is_a_square_full_frame() {
    let output = mandel().args(&["-w", "16"]).output().unwrap();
    assert!(output.status.success());
    let (w, h, payload) = ppm(&output.stdout);
    assert_eq!((w, h), (16, 16));
    assert_eq!(payload.len(), 16 * 16 * 3);
}

#[test]
fn tiny_frame_pixels_are_exact() {
    // A 2x2 grid over an 8-wide region samples (-4,0), (0,0), (-4,-4)
    // and (0,-4); only the origin is in the set.  Escapees get the
    // first keyframe (red), the origin gets the in-set default black.
    let output = mandel()
        .args(&["-w", "2", "-d", "8/8", "-p", "f00/0f0"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let (w, h, payload) = ppm(&output.stdout);
    assert_eq!((w, h), (2, 2));
    assert_eq!(payload, vec![255, 0, 0, 0, 0, 0, 255, 0, 0, 255, 0, 0]);
}

#[test]
fn a_lone_palette_keyframe_falls_back_to_the_default_gradient() {
    let defaulted = mandel().args(&["-w", "8"]).output().unwrap();
    let lone = mandel().args(&["-w", "8", "-p", "f00"]).output().unwrap();
    assert!(defaulted.status.success());
    assert!(lone.status.success());
    assert_eq!(defaulted.stdout, lone.stdout);
}

#[test]
fn file_output_matches_stdout_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ppm");
    let streamed = mandel().args(&["-w", "8", "-n"]).output().unwrap();
    assert!(streamed.status.success());
    mandel()
        .args(&["-w", "8", "-n"])
        .arg(&path)
        .assert()
        .success();
    assert_eq!(fs::read(&path).unwrap(), streamed.stdout);
}

#[test]
fn dash_means_stdout() {
    let streamed = mandel().args(&["-w", "8"]).output().unwrap();
    let dashed = mandel().args(&["-w", "8", "-"]).output().unwrap();
    assert_eq!(streamed.stdout, dashed.stdout);
}

#[test]
fn zero_width_is_rejected_before_rendering() {
    mandel()
        .args(&["-w", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}

#[test]
fn negative_region_dimensions_are_rejected() {
    mandel()
        .args(&["-d", "4/-4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("region dimensions"));
}

#[test]
fn the_exotic_variants_render() {
    for args in &[
        vec!["-s", "1", "-w", "8"],
        vec!["-s", "2", "-w", "8"],
        vec!["-s", "3", "-w", "8"],
        vec!["-s", "4", "-w", "8", "-j", "0.3/0.5", "-n"],
    ] {
        let output = mandel().args(args).output().unwrap();
        assert!(output.status.success());
        let (w, h, payload) = ppm(&output.stdout);
        assert_eq!((w, h), (8, 8));
        assert_eq!(payload.len(), 8 * 8 * 3);
    }
}
