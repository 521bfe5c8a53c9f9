use approx::assert_relative_eq;
use glam::DVec3;
use pen_curve_editor::{
    AnchorType, CurveModel, CustomShape, ProjectionPlane, SelectionBox, PSCALE_ROLL_ATTRIBUTE,
};

fn assert_prims_consistent(model: &CurveModel) {
    let mut expected = 0;
    for prim in model.prims() {
        assert_eq!(prim.start, expected);
        assert!(prim.end > prim.start);
        expected = prim.end;
    }
    assert_eq!(expected, model.anchor_count());
}

/// Zeichnet eine offene Kurve mit Smooth-Ankern.
fn draw(model: &mut CurveModel, points: &[DVec3]) -> usize {
    let first = model.append_anchor(points[0], None, false);
    let prim = model.prim_of(first).expect("Prim erwartet");
    for p in &points[1..] {
        model.append_anchor(*p, Some(prim), true);
    }
    for i in model.prim(prim).range() {
        model.set_anchor_type(i, AnchorType::Smooth);
    }
    prim
}

#[test]
fn test_draw_insert_remove_session() {
    let mut model = CurveModel::new();
    let prim = draw(
        &mut model,
        &[
            DVec3::ZERO,
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
        ],
    );
    let samples: Vec<DVec3> = (0..=8).map(|k| model.evaluate(prim, k as f64 / 8.0)).collect();

    // Einfügen an den Segmentmitten ändert die Form nicht
    model.insert_anchor_on_curve(prim, 0.75).unwrap();
    model.insert_anchor_on_curve(prim, 1.0 / 6.0).unwrap();
    assert_eq!(model.prim(prim).len(), 5);
    assert_prims_consistent(&model);

    // Die ursprünglichen Anker liegen jetzt bei 0, 2 und 4
    assert_relative_eq!(model.anchor(2).position.distance(samples[4]), 0.0, epsilon = 1e-9);
    assert_relative_eq!(model.anchor(4).position.distance(samples[8]), 0.0, epsilon = 1e-9);
    let quarter = model.evaluate_segment(0, 1.0);
    assert_relative_eq!(quarter.distance(samples[2]), 0.0, epsilon = 1e-9);

    model.remove_anchors(&[1, 3]);
    assert_eq!(model.prim(prim).len(), 3);
    assert_prims_consistent(&model);
}

#[test]
fn test_closed_shape_stamp_and_duplicate() {
    let points = [
        DVec3::new(-1.0, -1.0, 0.0),
        DVec3::new(-1.0, -1.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0),
        DVec3::new(1.0, -1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(-1.0, 1.0, 0.0),
        DVec3::new(-1.0, 1.0, 0.0),
        DVec3::new(-1.0, 1.0, 0.0),
        DVec3::new(-1.0, -1.0, 0.0),
    ];
    let shape = CustomShape::from_bezier_points(&points, true, 1e-4, 1e-7)
        .expect("Quadrat-Vorlage erwartet");
    assert_eq!(shape.anchors.len(), 4);

    let mut model = CurveModel::new();
    let prim = model.insert_custom_shape(
        &shape,
        "square",
        DVec3::new(0.0, 0.0, 3.0),
        None,
        ProjectionPlane::Xy,
    );
    assert!(model.prim(prim).is_closed);
    assert!(model
        .anchors()
        .iter()
        .all(|a| a.anchor_type == AnchorType::Corner && a.position.z == 3.0));

    let copy = model
        .duplicate_prim(prim, DVec3::new(10.0, 0.0, 0.0))
        .expect("Duplikat erwartet");
    let centroid = model.prim_centroid(copy);
    assert_relative_eq!(centroid.x, 10.0, epsilon = 1e-12);
    assert_relative_eq!(centroid.y, 0.0, epsilon = 1e-12);
    assert_eq!(model.prim(copy).name, "square");
    assert_prims_consistent(&model);

    let label = model.label_position(copy);
    assert_relative_eq!(label.x, 10.0, epsilon = 1e-12);
}

#[test]
fn test_selection_box_rescales_group() {
    let mut model = CurveModel::new();
    draw(
        &mut model,
        &[DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(4.0, 2.0, 0.0)],
    );
    let sb = SelectionBox::from_anchors(&model, &[0, 1, 2]).expect("Box erwartet");
    assert_eq!(sb.size, DVec3::new(4.0, 2.0, 0.0));

    // Z ist flach: Skalierung 1, keine Division durch 0
    sb.apply(&mut model, sb.center, DVec3::new(8.0, 2.0, 5.0), [0.0; 3], 1e-6);

    assert_relative_eq!(model.anchor(0).position.x, -2.0);
    assert_relative_eq!(model.anchor(2).position.x, 6.0);
    assert!(model.anchors().iter().all(|a| a.position.z == 0.0));
}

#[test]
fn test_attribute_flow_through_edits() {
    let mut model = CurveModel::new();
    draw(
        &mut model,
        &[DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0), DVec3::new(6.0, 0.0, 0.0)],
    );
    let inserted = model.insert_anchor_on_curve(0, 0.25).unwrap();

    let pr = model.anchor(inserted).attributes[PSCALE_ROLL_ATTRIBUTE].clone();
    assert_eq!(pr, pen_curve_editor::AttributeValue::Pair([1.0, 0.0]));

    let geo = model.export();
    assert!(geo.prims[0]
        .points
        .iter()
        .all(|p| p.attribs.contains_key(PSCALE_ROLL_ATTRIBUTE)));
}
