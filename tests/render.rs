//! Validates compositing semantics, dispatch isolation, and archive packaging

use dropforge::collection::design::RenderJob;
use dropforge::io::archive;
use dropforge::render::compositor::{self, RenderOptions};
use dropforge::render::dispatcher;
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_solid_layer(dir: &Path, name: &str, pixel: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(2, 2, Rgba(pixel)).save(&path).unwrap();
    path
}

fn options(dir: &Path) -> RenderOptions {
    RenderOptions {
        output_dir: dir.to_path_buf(),
        name_format: "item-{}".to_string(),
    }
}

#[test]
fn test_layers_composite_over_base() {
    let workspace = TempDir::new().unwrap();
    let base = write_solid_layer(workspace.path(), "base.png", [255, 0, 0, 255]);

    // Top layer covers only the origin pixel; the rest stays transparent
    let top_path = workspace.path().join("top.png");
    RgbaImage::from_fn(2, 2, |x, y| {
        if x == 0 && y == 0 {
            Rgba([0, 0, 255, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
    .save(&top_path)
    .unwrap();

    let job = RenderJob {
        unique_index: "1".to_string(),
        layers: vec![base, top_path],
    };
    let output = compositor::render(&job, &options(workspace.path())).unwrap();

    assert_eq!(output.file_name().and_then(|n| n.to_str()), Some("item-1.png"));

    let rendered = image::open(&output).unwrap().to_rgba8();
    assert_eq!(rendered.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
    assert_eq!(rendered.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
}

#[test]
fn test_rendering_same_job_twice_is_deterministic() {
    let workspace = TempDir::new().unwrap();
    let base = write_solid_layer(workspace.path(), "base.png", [10, 20, 30, 255]);
    let top = write_solid_layer(workspace.path(), "top.png", [200, 100, 50, 128]);

    let job = RenderJob {
        unique_index: "7".to_string(),
        layers: vec![base, top],
    };

    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let first = compositor::render(&job, &options(first_dir.path())).unwrap();
    let second = compositor::render(&job, &options(second_dir.path())).unwrap();

    assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
}

#[test]
fn test_empty_job_is_rejected() {
    let workspace = TempDir::new().unwrap();
    let job = RenderJob {
        unique_index: "0".to_string(),
        layers: vec![],
    };

    let error = compositor::render(&job, &options(workspace.path())).unwrap_err();
    assert!(error.to_string().contains("no layers"));
}

#[test]
fn test_failures_stay_isolated_from_siblings() {
    let workspace = TempDir::new().unwrap();
    let layer = write_solid_layer(workspace.path(), "layer.png", [0, 255, 0, 255]);

    let jobs = vec![
        RenderJob {
            unique_index: "1".to_string(),
            layers: vec![layer.clone()],
        },
        RenderJob {
            unique_index: "2".to_string(),
            layers: vec![workspace.path().join("missing.png")],
        },
        RenderJob {
            unique_index: "3".to_string(),
            layers: vec![layer],
        },
    ];

    let output_dir = TempDir::new().unwrap();
    let opts = options(output_dir.path());
    let report = dispatcher::dispatch(jobs, &opts, 4, None).unwrap();

    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.total(), 3);
    assert!(!report.is_clean());
    assert_eq!(report.failures.first().unwrap().unique_index, "2");

    assert!(output_dir.path().join("item-1.png").exists());
    assert!(output_dir.path().join("item-3.png").exists());
    assert!(!output_dir.path().join("item-2.png").exists());
}

#[test]
fn test_pool_size_does_not_change_output() {
    let workspace = TempDir::new().unwrap();
    let base = write_solid_layer(workspace.path(), "base.png", [40, 40, 40, 255]);
    let top = write_solid_layer(workspace.path(), "top.png", [0, 0, 200, 90]);

    let jobs: Vec<RenderJob> = (1..=6)
        .map(|index| RenderJob {
            unique_index: index.to_string(),
            layers: vec![base.clone(), top.clone()],
        })
        .collect();

    let serial_dir = TempDir::new().unwrap();
    let parallel_dir = TempDir::new().unwrap();

    let serial = dispatcher::dispatch(jobs.clone(), &options(serial_dir.path()), 1, None).unwrap();
    let parallel = dispatcher::dispatch(jobs, &options(parallel_dir.path()), 8, None).unwrap();

    assert!(serial.is_clean());
    assert!(parallel.is_clean());

    for index in 1..=6 {
        let name = format!("item-{index}.png");
        let serial_bytes = fs::read(serial_dir.path().join(&name)).unwrap();
        let parallel_bytes = fs::read(parallel_dir.path().join(&name)).unwrap();
        assert_eq!(serial_bytes, parallel_bytes);
    }
}

#[test]
fn test_zero_workers_is_rejected() {
    let opts = options(Path::new("unused"));
    let error = dispatcher::dispatch(vec![], &opts, 0, None).unwrap_err();
    assert!(error.to_string().contains("pool size"));
}

#[test]
fn test_archive_packs_every_rendered_file() {
    let workspace = TempDir::new().unwrap();
    let collection_dir = workspace.path().join("collection");
    fs::create_dir(&collection_dir).unwrap();
    write_solid_layer(&collection_dir, "item-1.png", [1, 2, 3, 255]);
    write_solid_layer(&collection_dir, "item-2.png", [4, 5, 6, 255]);

    let archive_path = workspace.path().join("collection.zip");
    archive::archive_directory(&collection_dir, &archive_path).unwrap();

    let file = fs::File::open(&archive_path).unwrap();
    let zipped = zip::ZipArchive::new(file).unwrap();

    let mut names: Vec<&str> = zipped.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["item-1.png", "item-2.png"]);

    archive::remove_directory(&collection_dir).unwrap();
    assert!(!collection_dir.exists());
}
