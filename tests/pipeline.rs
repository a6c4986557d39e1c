use std::fs;

use binscope::viz::{export_display_png, export_png, to_display_image};
use binscope::{analyze, analyze_path, BlockKey, Error, VisualizerConfig};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 64 KiB of zeros followed by 64 KiB of pseudo-random bytes.
fn mixed_payload() -> Vec<u8> {
    let mut data = vec![0u8; 64 * 1024];
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    data.extend((0..64 * 1024).map(|_| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 24) as u8
    }));
    data
}

#[test]
fn analyze_path_matches_in_memory_analysis() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payload.bin");
    let data = mixed_payload();
    fs::write(&path, &data).unwrap();

    let config = VisualizerConfig::default();
    let from_file = analyze_path(&path, &config).unwrap();
    let from_memory = analyze(&data, &config).unwrap();

    assert_eq!(from_file.file_name(), Some("payload.bin"));
    assert_eq!(from_file.size(), data.len() as u64);
    assert_eq!(from_file.digest(), from_memory.digest());
    assert_eq!(from_file.grid(), from_memory.grid());
    assert_eq!(from_file.entropy_map(), from_memory.entropy_map());
}

#[test]
fn structured_and_random_regions_separate() {
    init_logging();
    let analysis = analyze(&mixed_payload(), &VisualizerConfig::default()).unwrap();

    // 128 KiB at width 256 is 512 rows; the zero half is rows 0..256
    assert_eq!(analysis.grid().height(), 512);
    assert_eq!(analysis.entropy(BlockKey::new(0, 0)), Some(0.0));
    let random = analysis.entropy(BlockKey::new(0, 10)).unwrap();
    assert!(random > 7.5, "random block entropy {random}");

    let average = analysis.average_entropy().unwrap();
    assert!(average > 3.5 && average < 4.1, "average {average}");
}

#[test]
fn empty_file_is_not_an_error() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.bin");
    fs::write(&path, b"").unwrap();

    let config = VisualizerConfig::default();
    let analysis = analyze_path(&path, &config).unwrap();
    assert!(analysis.is_empty());
    assert_eq!(analysis.grid().height(), 0);
    assert_eq!(analysis.average_entropy(), None);

    let summary = analysis.summary(&config);
    assert_eq!(summary.entropy_display(), "N/A");
    assert_eq!(summary.size_display(), "0");
    assert_eq!(analysis.entropy_at_display(10, 10, &config), None);

    let out = dir.path().join("empty.png");
    assert!(matches!(
        export_png(analysis.grid(), &out),
        Err(Error::EmptyImage)
    ));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.bin");
    match analyze_path(&path, &VisualizerConfig::default()) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn summary_reports_display_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.dat");
    let data: Vec<u8> = (0..=255).cycle().take(1234).collect();
    fs::write(&path, &data).unwrap();

    let config = VisualizerConfig::default().with_digest_prefix_len(16);
    let analysis = analyze_path(&path, &config).unwrap();
    let summary = analysis.summary(&config);

    assert_eq!(summary.file_name.as_deref(), Some("sample.dat"));
    assert_eq!(summary.size_display(), "1,234");
    assert_eq!(summary.digest_prefix.len(), 16);
    assert!(analysis.digest().to_hex().starts_with(&summary.digest_prefix));
    assert_eq!(summary.average_entropy, analysis.average_entropy());

    let text = summary.to_string();
    assert!(text.contains("File: sample.dat"));
    assert!(text.contains("Size: 1,234 Bytes"));
}

#[test]
fn export_writes_readable_pngs() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = VisualizerConfig::default();
    let analysis = analyze(&mixed_payload(), &config).unwrap();

    let native = dir.path().join("native.png");
    export_png(analysis.grid(), &native).unwrap();
    let decoded = image::open(&native).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (256, 512));
    assert_eq!(decoded.as_raw().as_slice(), analysis.grid().as_raw());

    let scaled = dir.path().join("scaled.png");
    export_display_png(analysis.grid(), &config, &scaled).unwrap();
    let decoded = image::open(&scaled).unwrap().to_rgb8();
    assert_eq!(decoded, to_display_image(analysis.grid(), &config));
}

#[test]
fn export_to_unwritable_destination_fails() {
    let dir = tempfile::tempdir().unwrap();
    let analysis = analyze(&[1, 2, 3], &VisualizerConfig::default()).unwrap();
    let path = dir.path().join("missing-dir").join("out.png");

    assert!(matches!(
        export_png(analysis.grid(), &path),
        Err(Error::Export { .. })
    ));
    // The in-memory result is untouched
    assert_eq!(analysis.size(), 3);
}

#[test]
fn hover_lookup_agrees_with_block_indexing() {
    let config = VisualizerConfig::default();
    let analysis = analyze(&mixed_payload(), &config).unwrap();

    // Grid is 256x512 on a 512x512 canvas: 2 canvas px per column, 1 per row
    assert_eq!(analysis.entropy_at_display(0, 0, &config), Some(0.0));
    assert_eq!(
        analysis.entropy_at_display(100, 300, &config),
        analysis.entropy(BlockKey::new(1, 9))
    );
    assert_eq!(analysis.entropy_at_display(512, 0, &config), None);

    let info = analysis.inspect_display(100, 300, &config).unwrap();
    assert_eq!(info.key, BlockKey::new(1, 9));
    assert_eq!(info.pixels, (32, 288, 64, 320));
    assert_eq!(info.first_offset, 288 * 256 + 32);
    assert_eq!(info.byte_count, 32 * 32);
}

#[test]
fn hover_past_data_reports_no_data() {
    // 10 bytes on a 256-wide grid shown 1:1: only block (0, 0) holds data
    let config = VisualizerConfig::default().with_display_size(256, 1);
    let analysis = analyze(&[5u8; 10], &config).unwrap();

    assert_eq!(analysis.entropy_at_display(9, 0, &config), Some(0.0));
    assert_eq!(analysis.entropy_at_display(31, 0, &config), Some(0.0));
    assert_eq!(analysis.entropy_at_display(32, 0, &config), None);
    assert_eq!(analysis.entropy_at_display(200, 0, &config), None);
    assert_eq!(analysis.entropy_at_display(0, 1, &config), None);
    assert!(analysis.inspect_display(200, 0, &config).is_none());
}
