//! End-to-end renders through headless Chrome
#![cfg(feature = "cdp")]

use bitmapper::cdp::CdpEngine;
use bitmapper::render::run;
use bitmapper::{AnimatedCursor, Clip, Config, EngineConfig, Error};
use std::path::Path;

const POINTER: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 32 32"><path d="M4 4L28 16L16 18L12 28Z" fill="#000"/></svg>"##;

fn workspace(sources: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let svg_dir = dir.path().join("svg");
    std::fs::create_dir(&svg_dir).unwrap();
    for (name, markup) in sources {
        std::fs::write(svg_dir.join(name), markup).unwrap();
    }
    let config = Config {
        svgs_dir: svg_dir,
        bitmaps_dir: dir.path().join("bitmaps"),
        animated_clip: Clip {
            x: 0.0,
            y: 0.0,
            width: 24.0,
            height: 24.0,
        },
        engine: EngineConfig {
            sandbox: std::env::var("BITMAPPER_NO_SANDBOX").is_err(),
            ..Default::default()
        },
        ..Default::default()
    };
    (dir, config)
}

fn png_size(path: &Path) -> (u32, u32) {
    let bytes = std::fs::read(path).expect("read bitmap");
    assert_eq!(&bytes[0..8], b"\x89PNG\r\n\x1a\n");
    image::image_dimensions(path).expect("decode bitmap")
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_static_cursor_matches_svg_box() {
    let (_dir, mut config) = workspace(&[("pointer.svg", POINTER)]);
    config.static_cursors.push("pointer.svg".into());

    let report = run::<CdpEngine>(&config).expect("render failed");

    assert_eq!(report.static_outputs.len(), 1);
    assert_eq!(png_size(&report.static_outputs[0]), (32, 32));
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_animated_cursor_matches_clip() {
    let (_dir, mut config) = workspace(&[("spin.svg", POINTER)]);
    config
        .animated_cursors
        .insert("spin.svg".into(), AnimatedCursor { frames: 3 });

    let report = run::<CdpEngine>(&config).expect("render failed");

    assert_eq!(report.animated_outputs.len(), 3);
    for out in &report.animated_outputs {
        assert_eq!(png_size(out), (24, 24));
    }
    assert!(config.bitmaps_dir.join("spin-3.png").is_file());
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_markup_without_svg_fails() {
    let (_dir, mut config) = workspace(&[("broken.svg", "<div>no drawable</div>")]);
    config.static_cursors.push("broken.svg".into());

    let err = run::<CdpEngine>(&config).unwrap_err();

    assert!(matches!(err, Error::ElementNotFound { .. }), "got {:?}", err);
    assert!(!config.bitmaps_dir.join("broken.png").exists());
}
