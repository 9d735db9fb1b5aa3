#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use approx::assert_abs_diff_eq;
use roofplan::adapters::DrawingPayload;
use roofplan::geometry::Polygon;
use roofplan::math::{Point2, TOLERANCE};
use roofplan::{layout_sheets, next_name, LineRole, Project, RoofMaterial, Sheet};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn standard() -> RoofMaterial {
    RoofMaterial::new(1.2, 1.19, 0.35, 0.5, 8.0).unwrap()
}

fn polygon(points: &[(f64, f64)]) -> Polygon {
    Polygon::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}

fn lay(points: &[(f64, f64)]) -> Vec<Sheet> {
    init_tracing();
    let sheets = layout_sheets(&polygon(points), &standard()).unwrap();
    assert_sheet_properties(&sheets, &standard());
    sheets
}

fn assert_sheet_properties(sheets: &[Sheet], m: &RoofMaterial) {
    for s in sheets {
        assert!(s.length >= m.min_length - TOLERANCE, "{s:?}");
        assert!(s.length <= m.max_length + TOLERANCE, "{s:?}");
        assert_abs_diff_eq!(s.area, m.overall_width * s.length, epsilon = 0.02);
    }
}

#[test]
fn right_triangle_slope() {
    assert_eq!(lay(&[(0.0, 0.0), (10.8, 0.0), (5.4, 6.15)]).len(), 9);
}

#[test]
fn pentagon_slope() {
    let sheets = lay(&[
        (0.0, 0.0),
        (0.0, 2.8),
        (2.3, 2.8),
        (5.18, 6.2),
        (7.48, 6.2),
        (13.1, 0.0),
    ]);
    assert_eq!(sheets.len(), 11);
}

#[test]
fn mirror_pentagon_slope() {
    let sheets = lay(&[
        (0.0, 0.0),
        (5.62, 6.2),
        (7.92, 6.2),
        (10.55, 3.03),
        (13.1, 3.03),
        (13.1, 0.0),
    ]);
    assert_eq!(sheets.len(), 11);
}

#[test]
fn pentagon_with_triangle_cut() {
    let sheets = lay(&[
        (0.0, 4.95),
        (6.3, 4.95),
        (6.3, 0.0),
        (4.85, 0.0),
        (0.0, 4.95),
    ]);
    assert_eq!(sheets.len(), 6);
}

#[test]
fn small_right_triangle_at_min_length() {
    assert_eq!(lay(&[(0.0, 2.7), (2.3, 2.7), (2.3, 0.0)]).len(), 2);
}

#[test]
fn naming_sequence() {
    assert_eq!(next_name(&HashSet::new()), "A");

    let mut existing = HashSet::new();
    for _ in 0..26 {
        let name = next_name(&existing);
        existing.insert(name);
    }
    assert!(existing.contains("Z"));
    assert_eq!(next_name(&existing), "AA");

    let gaps: HashSet<String> = ["A", "B", "D"].iter().map(|s| (*s).to_owned()).collect();
    assert_eq!(next_name(&gaps), "C");
}

#[test]
fn adjacent_columns_step_by_useful_width() {
    let m = standard();
    let sheets = layout_sheets(&Polygon::rectangle(0.0, 0.0, 6.0, 20.0), &m).unwrap();
    assert_sheet_properties(&sheets, &m);

    let mut columns: Vec<f64> = sheets.iter().map(|s| s.x_start).collect();
    columns.dedup_by(|a, b| (*a - *b).abs() < TOLERANCE);
    for pair in columns.windows(2) {
        assert_abs_diff_eq!(pair[1] - pair[0], m.useful_width, epsilon = 0.011);
    }

    let first_column: Vec<&Sheet> = sheets
        .iter()
        .filter(|s| s.x_start.abs() < TOLERANCE)
        .collect();
    assert_eq!(first_column.len(), 3);
    for pair in first_column.windows(2) {
        let top = pair[0].y_start + pair[0].length;
        assert_abs_diff_eq!(top - pair[1].y_start, m.overlap, epsilon = 1e-6);
    }
}

const GABLE_ROOF: &str = r#"{
    "lines": [
        {"role": "eave",  "start": {"x": 0,  "y": 0}, "end": {"x": 10, "y": 0}},
        {"role": "gable", "start": {"x": 10, "y": 0}, "end": {"x": 10, "y": 3}},
        {"role": "ridge", "start": {"x": 10, "y": 3}, "end": {"x": 0,  "y": 3}},
        {"role": "gable", "start": {"x": 0,  "y": 3}, "end": {"x": 0,  "y": 0}},
        {"role": "gable", "start": {"x": 10, "y": 3}, "end": {"x": 10, "y": 6}},
        {"role": "eave",  "start": {"x": 10, "y": 6}, "end": {"x": 0,  "y": 6}},
        {"role": "gable", "start": {"x": 0,  "y": 6}, "end": {"x": 0,  "y": 3}}
    ],
    "material": {
        "overall_width": 1.2, "useful_width": 1.19, "overlap": 0.35,
        "min_length": 0.5, "max_length": 8.0
    }
}"#;

#[test]
fn gable_roof_end_to_end() {
    init_tracing();
    let payload = DrawingPayload::from_json(GABLE_ROOF).unwrap();
    let material = payload.material().unwrap().unwrap();
    let mut project = payload.into_project().unwrap();

    let slopes = project.rebuild_slopes().unwrap();
    assert_eq!(slopes.len(), 2);

    for &slope in &slopes {
        let ids = project.lay_sheets(slope, &material).unwrap();
        assert_eq!(ids.len(), 9);
        for (_, placed) in project.sheets_of(slope).unwrap() {
            assert_abs_diff_eq!(placed.sheet.length, 3.0, epsilon = 1e-9);
            assert_abs_diff_eq!(placed.sheet.area, 3.6, epsilon = 1e-9);
        }
        let summary = project.cut_list_summary(slope).unwrap();
        assert_abs_diff_eq!(summary.slope_area, 30.0, epsilon = 1e-9);
    }

    let names: HashSet<&str> = project.sheets().map(|(_, s)| s.name.as_str()).collect();
    assert_eq!(names.len(), 18);
}

#[test]
fn hip_roof_end_to_end() {
    init_tracing();
    let mut project = Project::new();
    let p = Point2::new;
    let drawing = [
        (LineRole::Eave, p(0.0, 0.0), p(10.0, 0.0)),
        (LineRole::Eave, p(10.0, 0.0), p(10.0, 6.0)),
        (LineRole::Eave, p(10.0, 6.0), p(0.0, 6.0)),
        (LineRole::Eave, p(0.0, 6.0), p(0.0, 0.0)),
        (LineRole::Ridge, p(3.0, 3.0), p(7.0, 3.0)),
        (LineRole::Valley, p(0.0, 0.0), p(3.0, 3.0)),
        (LineRole::Valley, p(0.0, 6.0), p(3.0, 3.0)),
        (LineRole::Valley, p(10.0, 0.0), p(7.0, 3.0)),
        (LineRole::Valley, p(10.0, 6.0), p(7.0, 3.0)),
    ];
    for (role, start, end) in drawing {
        project.add_line(role, start, end).unwrap();
    }

    let slopes = project.rebuild_slopes().unwrap();
    assert_eq!(slopes.len(), 4);
    for line in project.lines() {
        let c = line.canonical.unwrap();
        for q in [c.start, c.end] {
            assert!(q.x >= -TOLERANCE && q.y >= -TOLERANCE);
        }
    }
    for &slope in &slopes {
        let sheets = project.lay_sheets(slope, &standard()).unwrap();
        assert!(!sheets.is_empty());
        let laid: Vec<Sheet> = project
            .sheets_of(slope)
            .unwrap()
            .iter()
            .map(|(_, placed)| placed.sheet)
            .collect();
        assert_sheet_properties(&laid, &standard());
    }
}
