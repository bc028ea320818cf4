use laoskit_camtools::{DocumentInfo, LaosDocument};
use laoskit_core::{DrawnPath, PaintAttributes, Point};
use laoskit_settings::{keys, FeatureTable, LaserConfig};

fn info() -> DocumentInfo {
    DocumentInfo {
        version: "0.4.0".to_string(),
        filename: "drawing.ps".to_string(),
        date: "Mon Jan  1 00:00:00 2024".to_string(),
    }
}

fn a4_config() -> LaserConfig {
    let mut features = FeatureTable::new();
    features.set(keys::PAGE_LENGTH, "595.28");
    features.set(keys::PAGE_WIDTH, "841.89");
    LaserConfig::from_features(&features)
}

#[test]
fn test_single_cut_line_document() {
    let mut doc = LaosDocument::new(Vec::new(), a4_config(), info());
    doc.open().unwrap();

    let path = DrawnPath::new(PaintAttributes::stroked(1.0, 0.0, 0.0, 0.0))
        .move_to(10.0, 20.0)
        .line_to(72.0, 0.5);
    doc.draw_path(&path).unwrap();

    let out = String::from_utf8(doc.close().unwrap()).unwrap();
    let expected = "; Generated by laoskit 0.4.0 from drawing.ps at Mon Jan  1 00:00:00 2024 \n\
                    7 201 0\n\
                    7 202 210002\n\
                    7 203 0\n\
                    7 204 297000\n\
                    7 100 100000\n\
                    7 101 5000\n\
                    7 100 100000\n\
                    7 101 7000\n\
                    7 100 10000\n\
                    7 101 10000\n\
                    0 3528 7056\n\
                    1 25400 176\n\
                    ; www.laoslaser.org";
    assert_eq!(out, expected);
}

#[test]
fn test_boundary_box_disabled() {
    let mut features = FeatureTable::new();
    features.set(keys::BOUNDARY_BOX, "False");
    features.set(keys::PROLOG, "");
    let config = LaserConfig::from_features(&features);

    let mut doc = LaosDocument::new(Vec::new(), config, info());
    doc.open().unwrap();
    let out = String::from_utf8(doc.close().unwrap()).unwrap();
    assert!(out.starts_with("7 100 100000\n"));
    assert!(!out.contains("7 201"));
}

#[test]
fn test_custom_presets_and_digits() {
    let mut features = FeatureTable::new();
    features.set(keys::CUTTING_SPEED, "v25");
    features.set(keys::CUTTING_POWER, "80%");
    features.set(keys::MARKING_SPEED, "mv50");
    features.set(keys::MARKING_POWER, "m30%");
    features.set(keys::BOUNDARY_BOX, "False");
    features.set(keys::PROLOG, "");
    features.set(keys::TRAILER, "");
    features.set(keys::SCALE, "1");
    features.set(keys::DIGITS, "2");
    let config = LaserConfig::from_features(&features);

    let mut doc = LaosDocument::new(Vec::new(), config, info());
    doc.open().unwrap();
    doc.draw_path(
        &DrawnPath::new(PaintAttributes::stroked(0.0, 0.0, 0.0, 1.0))
            .move_to(0.0, 0.0)
            .line_to(1.5, 2.25),
    )
    .unwrap();
    let out = String::from_utf8(doc.close().unwrap()).unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(
        lines,
        [
            "7 100 100000",
            "7 101 5000",
            "7 100 50000",
            "7 101 3000",
            "0 0.00 0.00",
            "1 1.50 2.25",
            "7 100 25000",
            "7 101 8000",
        ]
    );
}

#[test]
fn test_mixed_drawing_keeps_channel_order() {
    let mut features = FeatureTable::new();
    features.set(keys::BOUNDARY_BOX, "False");
    features.set(keys::PROLOG, "");
    features.set(keys::TRAILER, "");
    features.set(keys::SCALE, "1");
    let config = LaserConfig::from_features(&features);

    let mut doc = LaosDocument::new(Vec::new(), config, info());
    doc.open().unwrap();

    let red = PaintAttributes::stroked(1.0, 0.0, 0.0, 0.0);
    let wide = PaintAttributes::stroked(1.0, 0.0, 0.0, 3.0);
    doc.draw_path(&DrawnPath::new(red).move_to(0.0, 0.0).line_to(1.0, 0.0))
        .unwrap();
    doc.draw_path(&DrawnPath::new(wide).move_to(5.0, 5.0).line_to(6.0, 5.0))
        .unwrap();
    doc.draw_path(
        &DrawnPath::new(red)
            .move_to(2.0, 0.0)
            .curve_to(Point::new(2.0, 1.0), Point::new(3.0, 1.0), Point::new(3.0, 0.0)),
    )
    .unwrap();

    let out = String::from_utf8(doc.close().unwrap()).unwrap();
    let lines: Vec<_> = out.lines().collect();

    // engrave block: preset, then the wide red stroke
    assert_eq!(&lines[..4], ["7 100 100000", "7 101 5000", "0 5 5", "1 6 5"]);
    // cut block comes last and holds both red paths in drawing order
    let cut_start = lines.iter().rposition(|l| l.starts_with("7 100")).unwrap();
    assert_eq!(&lines[cut_start..cut_start + 4], ["7 100 10000", "7 101 10000", "0 0 0", "1 1 0"]);
    assert_eq!(lines[cut_start + 4], "0 2 0");
    assert_eq!(*lines.last().unwrap(), "1 3 0");
    assert_eq!(lines.len() - cut_start, 4 + 20);
}
