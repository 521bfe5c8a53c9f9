use super::*;
use crate::core::attribute::AttributeValue;
use crate::core::custom_shape::{CustomShape, CustomShapeAnchor, ProjectionPlane};
use approx::assert_relative_eq;

/// Prims lückenlos, sortiert, nicht leer und Vereinigung = alle Anker.
fn assert_prims_consistent(model: &CurveModel) {
    let mut expected = 0;
    for prim in model.prims() {
        assert_eq!(prim.start, expected, "Lücke vor Prim {:?}", prim);
        assert!(prim.end > prim.start, "leeres Prim {:?}", prim);
        expected = prim.end;
    }
    assert_eq!(expected, model.anchor_count());
}

fn assert_vec_eq(a: DVec3, b: DVec3) {
    assert_relative_eq!(a.distance(b), 0.0, epsilon = 1e-9);
}

/// Offenes Prim aus Positionen, alle Anker Smooth.
fn smooth_prim(model: &mut CurveModel, points: &[DVec3]) -> usize {
    let first = model.append_anchor(points[0], None, false);
    let prim = model.prim_of(first).unwrap();
    for p in &points[1..] {
        model.append_anchor(*p, Some(prim), true);
    }
    for i in model.prim(prim).range() {
        model.set_anchor_type(i, AnchorType::Smooth);
    }
    prim
}

fn wave() -> Vec<DVec3> {
    vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(3.0, 2.0, 0.0),
        DVec3::new(6.0, -1.0, 1.0),
        DVec3::new(9.0, 0.5, 0.0),
    ]
}

// ── Szenarien ───────────────────────────────────────────────────────

#[test]
fn test_append_builds_two_anchor_prim() {
    let mut model = CurveModel::new();
    let a = model.append_anchor(DVec3::ZERO, None, false);
    let b = model.append_anchor(DVec3::new(10.0, 0.0, 0.0), Some(0), true);

    assert_eq!((a, b), (0, 1));
    assert_eq!(model.prim_count(), 1);
    assert_eq!(model.prim(0).range(), 0..2);
    assert!(!model.prim(0).is_closed);
    assert_eq!(model.prim(0).name, "curve");

    let geo = model.export();
    let points: Vec<DVec3> = geo.prims[0].points.iter().map(|p| p.position).collect();
    assert_eq!(
        points,
        vec![
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0)
        ]
    );
    assert!(model
        .anchors()
        .iter()
        .all(|a| a.anchor_type == AnchorType::Corner));
}

#[test]
fn test_insert_midpoint_matches_de_casteljau() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    model.append_anchor(DVec3::new(10.0, 0.0, 0.0), Some(0), true);
    let expected = model.evaluate(0, 0.5);

    let inserted = model.insert_anchor_on_curve(0, 0.5).unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(model.prim(0).len(), 3);
    assert_vec_eq(model.anchor(1).position, expected);
    assert_vec_eq(expected, DVec3::new(5.0, 0.0, 0.0));
}

#[test]
fn test_remove_inserted_anchor_restores_endpoints() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    model.append_anchor(DVec3::new(10.0, 0.0, 0.0), Some(0), true);
    let before: Vec<[DVec3; 3]> = model.anchors().iter().map(|a| a.controls()).collect();

    model.insert_anchor_on_curve(0, 0.5).unwrap();
    model.remove_anchor(1);

    let after: Vec<[DVec3; 3]> = model.anchors().iter().map(|a| a.controls()).collect();
    assert_eq!(before, after);
    assert_eq!(model.prim(0).range(), 0..2);
}

// ── Topologie ───────────────────────────────────────────────────────

#[test]
fn test_prev_next_wrap_on_closed_prim() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());

    assert_eq!(model.prev_index(0), None);
    assert_eq!(model.next_index(3), None);
    assert_eq!(model.next_index(1), Some(2));

    model.close_prim(0, true);
    assert_eq!(model.prev_index(0), Some(3));
    assert_eq!(model.next_index(3), Some(0));
}

#[test]
fn test_prim_of_and_boundary() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.append_anchor(DVec3::new(20.0, 0.0, 0.0), None, false);

    assert_eq!(model.prim_of(2), Some(0));
    assert_eq!(model.prim_of(4), Some(1));
    assert_eq!(model.prim_of(5), None);
    assert_eq!(model.prim_boundary(0), Some((0, false)));
    assert_eq!(model.prim_boundary(3), Some((0, true)));
    assert_eq!(model.prim_boundary(1), None);

    model.close_prim(0, true);
    assert_eq!(model.prim_boundary(0), None);
}

#[test]
fn test_prim_ranges_stay_consistent() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    smooth_prim(&mut model, &wave()[..2]);
    model.append_anchor(DVec3::new(0.0, 0.0, 5.0), None, false);
    assert_prims_consistent(&model);

    model.append_anchor(DVec3::new(-1.0, 0.0, 0.0), Some(0), false);
    assert_prims_consistent(&model);
    assert_eq!(model.prim(1).range(), 5..7);

    model.insert_anchor_on_curve(0, 0.7).unwrap();
    assert_prims_consistent(&model);

    assert!(model.duplicate_prim(1, DVec3::new(0.0, 10.0, 0.0)).is_some());
    assert_prims_consistent(&model);

    model.remove_anchors(&[0, 6, 7]);
    assert_prims_consistent(&model);

    model.remove_prim(0);
    assert_prims_consistent(&model);

    model.remove_anchor(0);
    assert_prims_consistent(&model);
}

#[test]
fn test_remove_last_anchor_drops_prim() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    smooth_prim(&mut model, &wave());

    let removed = model.remove_anchor(0);
    assert_eq!(removed.position, DVec3::ZERO);
    assert_eq!(model.prim_count(), 1);
    assert_eq!(model.prim(0).range(), 0..4);
}

#[test]
fn test_remove_anchors_bumps_version_once() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let version = model.version();

    assert_eq!(model.remove_anchors(&[3, 1, 3]), 2);
    assert_eq!(model.version(), version + 1);
    assert_eq!(model.anchor_count(), 2);
    assert_eq!(model.remove_anchors(&[]), 0);
    assert_eq!(model.version(), version + 1);
}

#[test]
#[should_panic]
fn test_remove_anchors_out_of_range_panics() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.remove_anchors(&[1, 9]);
}

#[test]
#[should_panic]
fn test_append_to_closed_prim_panics() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.close_prim(0, true);
    model.append_anchor(DVec3::ONE, Some(0), true);
}

#[test]
fn test_reverse_twice_is_identity() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.move_control(1, Handle::Out, DVec3::new(4.0, 5.0, 0.0), HandleMove::default());
    model.set_tag(0, "start");
    let before: Vec<Anchor> = model.anchors().to_vec();

    model.reverse_prim(0);
    assert_eq!(model.anchor(0).position, before[3].position);
    assert_eq!(model.anchor(0).in_control, before[3].out_control);
    assert_eq!(model.anchor(3).tag, "start");

    model.reverse_prim(0);
    assert_eq!(model.anchors(), &before[..]);
}

#[test]
fn test_rewire_rotates_closed_prim() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.close_prim(0, true);
    let positions: Vec<DVec3> = model.anchors().iter().map(|a| a.position).collect();

    model.rewire_prim(2);

    let rotated: Vec<DVec3> = model.anchors().iter().map(|a| a.position).collect();
    assert_eq!(rotated, vec![positions[2], positions[3], positions[0], positions[1]]);
}

#[test]
fn test_rewire_open_boundary_is_noop() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let version = model.version();

    model.rewire_prim(0);
    model.rewire_prim(3);

    assert_eq!(model.version(), version);
}

#[test]
#[should_panic]
fn test_rewire_open_interior_panics() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.rewire_prim(1);
}

#[test]
fn test_duplicate_recenters_on_target() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.set_tag(1, "mid");
    model.add_attribute("width", AttributeType::FloatScale);
    model
        .set_attribute_value(2, "width", AttributeValue::Float(3.0))
        .unwrap();

    let target = DVec3::new(100.0, 0.0, 0.0);
    let copy = model
        .duplicate_prim(0, target)
        .expect("Duplikat erwartet");

    assert_eq!(copy, 1);
    assert_vec_eq(model.prim_centroid(copy), target);
    let offset = model.anchor(4).position - model.anchor(0).position;
    for i in 0..4 {
        assert_vec_eq(model.anchor(i + 4).out_control - model.anchor(i).out_control, offset);
    }
    assert!(model.anchor(5).tag.is_empty());
    assert_eq!(model.anchor(6).attributes["width"], AttributeValue::Float(3.0));

    // Keine geteilten Attributwerte
    model
        .set_attribute_value(6, "width", AttributeValue::Float(9.0))
        .unwrap();
    assert_eq!(model.anchor(2).attributes["width"], AttributeValue::Float(3.0));
}

#[test]
fn test_duplicate_single_anchor_prim_is_skipped() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::new(1.0, 2.0, 0.0), None, false);
    let version = model.version();

    assert_eq!(model.duplicate_prim(0, DVec3::new(5.0, 0.0, 0.0)), None);
    assert_eq!(model.prim_count(), 1);
    assert_eq!(model.anchor_count(), 1);
    assert_eq!(model.version(), version);
}

#[test]
fn test_insert_custom_shape_uses_plane_or_normal() {
    let shape = CustomShape::new(
        vec![
            CustomShapeAnchor {
                in_control: DVec3::new(0.0, 1.0, 0.0),
                position: DVec3::new(0.0, 1.0, 0.0),
                out_control: DVec3::new(0.0, 1.0, 0.0),
                anchor_type: AnchorType::Corner,
            },
            CustomShapeAnchor {
                in_control: DVec3::new(0.0, -1.0, 0.0),
                position: DVec3::new(0.0, -1.0, 0.0),
                out_control: DVec3::new(0.0, -1.0, 0.0),
                anchor_type: AnchorType::Corner,
            },
        ],
        true,
    );
    let mut model = CurveModel::new();
    let target = DVec3::new(5.0, 5.0, 5.0);

    let flat = model.insert_custom_shape(&shape, "line", target, None, ProjectionPlane::Xy);
    assert_vec_eq(model.anchor(0).position, DVec3::new(5.0, 6.0, 5.0));
    assert!(model.prim(flat).is_closed);
    assert_eq!(model.prim(flat).name, "line");

    model.insert_custom_shape(&shape, "line", target, None, ProjectionPlane::Xz);
    assert_vec_eq(model.anchor(2).position, DVec3::new(5.0, 5.0, 6.0));

    // +Z der Vorlage auf +X: +Y bleibt +Y
    model.insert_custom_shape(&shape, "line", target, Some(DVec3::X), ProjectionPlane::Xz);
    assert_vec_eq(model.anchor(4).position, DVec3::new(5.0, 6.0, 5.0));
    assert_eq!(model.anchor(4).attributes.len(), 1);
    assert_prims_consistent(&model);
}

// ── Subdivision ─────────────────────────────────────────────────────

#[test]
fn test_subdivision_preserves_curve_shape() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let original = model.clone();

    // Segment 1 (Anker 1 → 2) bei t = 0.3 teilen
    let t = 0.3;
    let inserted = model.split_segment(1, t);
    assert_eq!(inserted, 2);

    for k in 0..=20 {
        let tau = k as f64 / 20.0;
        let expected = original.evaluate_segment(1, tau);
        let actual = if tau <= t {
            model.evaluate_segment(1, tau / t)
        } else {
            model.evaluate_segment(2, (tau - t) / (1.0 - t))
        };
        assert_vec_eq(actual, expected);

        // Unberührte Segmente bleiben identisch
        assert_vec_eq(model.evaluate_segment(0, tau), original.evaluate_segment(0, tau));
        assert_vec_eq(model.evaluate_segment(3, tau), original.evaluate_segment(2, tau));
    }
}

#[test]
fn test_subdivision_on_closing_segment() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.close_prim(0, true);
    model.set_anchor_type(0, AnchorType::Smooth);
    model.set_anchor_type(3, AnchorType::Smooth);
    // u = 0.9 bei 4 Segmenten → schließendes Segment 3, t = 0.6
    let expected = model.evaluate_segment(3, 0.6);

    let inserted = model.insert_anchor_on_curve(0, 0.9).unwrap();

    assert_eq!(inserted, 4);
    assert_eq!(model.prim(0).len(), 5);
    assert_eq!(model.next_index(4), Some(0));
    assert_vec_eq(model.anchor(4).position, expected);
    assert_prims_consistent(&model);
}

#[test]
fn test_insert_on_single_anchor_prim_is_none() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    assert_eq!(model.insert_anchor_on_curve(0, 0.5), None);
    assert_eq!(model.evaluate(0, 0.5), DVec3::ZERO);
}

#[test]
fn test_subdivision_interpolates_attributes() {
    let mut model = CurveModel::new();
    model.add_attribute("step", AttributeType::IntegerLadder);
    model.add_attribute("scale", AttributeType::FloatScale);
    model.add_attribute("dir", AttributeType::VectorArbitrary);
    smooth_prim(&mut model, &wave());
    for (i, v) in [(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0)] {
        model
            .set_attribute_value(i, "scale", AttributeValue::Float(v))
            .unwrap();
    }
    model
        .set_attribute_value(1, "step", AttributeValue::Int(7))
        .unwrap();
    model
        .set_attribute_value(2, "dir", AttributeValue::Vector([1.0, 0.0, 0.0]))
        .unwrap();

    let inserted = model.split_segment(1, 0.5);
    let attrs = &model.anchor(inserted).attributes;

    assert_eq!(attrs["step"], AttributeValue::Int(7));
    match &attrs["scale"] {
        AttributeValue::Float(v) => assert_relative_eq!(*v, 2.5, epsilon = 1e-12),
        other => panic!("Float erwartet, war {:?}", other),
    }
    match &attrs["dir"] {
        AttributeValue::Vector(v) => {
            let expected = DVec3::new(1.0, 1.0, 0.0).normalize();
            assert_vec_eq(DVec3::from_array(*v), expected);
        }
        other => panic!("Vektor erwartet, war {:?}", other),
    }
    assert_eq!(attrs.get_index(0).map(|(k, _)| k.as_str()), Some("__pr"));
}

#[test]
fn test_split_anchor_type_is_classified() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    model.append_anchor(DVec3::new(9.0, 0.0, 0.0), Some(0), true);
    let corner_split = model.insert_anchor_on_curve(0, 0.5).unwrap();
    // Gerade aus kollabierten Handles: Split-Handles liegen auf einer Linie
    assert_eq!(model.anchor(corner_split).anchor_type, AnchorType::Smooth);

    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let smooth_split = model.split_segment(0, 0.4);
    assert_eq!(model.anchor(smooth_split).anchor_type, AnchorType::Smooth);
}

// ── Anker-Typen und Handles ─────────────────────────────────────────

#[test]
fn test_corner_collapses_handles() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.set_anchor_type(1, AnchorType::Corner);

    let a = model.anchor(1);
    assert_eq!(a.in_control, a.position);
    assert_eq!(a.out_control, a.position);
}

#[test]
fn test_smooth_handles_are_symmetric() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    for i in 0..4 {
        model.set_anchor_type(i, AnchorType::Smooth);
        let a = model.anchor(i);
        assert_vec_eq(a.position - a.in_control, a.out_control - a.position);
    }
    // Innen: Gradient / 4
    let expected = (wave()[2] - wave()[0]) * 0.25;
    assert_vec_eq(model.anchor(1).out_control - model.anchor(1).position, expected);
    // Offener Rand: eigene Position ersetzt den fehlenden Nachbarn
    let expected = (wave()[1] - wave()[0]) * 0.25;
    assert_vec_eq(model.anchor(0).out_control - model.anchor(0).position, expected);
}

#[test]
fn test_untied_keeps_handles() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let before = model.anchor(2).controls();
    model.set_anchor_type(2, AnchorType::Untied);
    assert_eq!(model.anchor(2).controls(), before);
    assert_eq!(model.anchor(2).anchor_type, AnchorType::Untied);
}

#[test]
fn test_toggle_smoothness() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    model.append_anchor(DVec3::X, Some(0), true);
    model.append_anchor(DVec3::new(2.0, 1.0, 0.0), Some(0), true);

    model.toggle_anchor_smoothness(1);
    assert_eq!(model.anchor(1).anchor_type, AnchorType::Smooth);
    model.toggle_anchor_smoothness(1);
    assert_eq!(model.anchor(1).anchor_type, AnchorType::Corner);
}

#[test]
fn test_move_anchor_is_rigid() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let before = model.anchor(1).controls();
    let target = DVec3::new(1.0, 1.0, 1.0);

    model.move_anchor(1, target);

    let delta = target - before[1];
    let after = model.anchor(1).controls();
    for k in 0..3 {
        assert_vec_eq(after[k], before[k] + delta);
    }

    model.move_anchors(&[0, 1], DVec3::Z);
    assert_vec_eq(model.anchor(1).position, target + DVec3::Z);
}

#[test]
fn test_move_control_marks_free_move_untied() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let mode = HandleMove {
        aligned: false,
        symmetric: false,
        rotate_about_anchor: false,
    };
    let old_in = model.anchor(1).in_control;
    model.move_control(1, Handle::Out, DVec3::new(3.0, 5.0, 0.0), mode);

    assert_eq!(model.anchor(1).anchor_type, AnchorType::Untied);
    assert_eq!(model.anchor(1).in_control, old_in);
}

// ── Ausrichten ──────────────────────────────────────────────────────

#[test]
fn test_straighten_run_distributes_evenly() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    model.set_anchor_type(2, AnchorType::Corner);
    let start = model.anchor(0).position;
    let end = model.anchor(3).position;
    let first_in = model.anchor(0).in_control;

    model.straighten_run(&[0, 1, 2, 3]);

    let line = end - start;
    let gradient = line / 9.0;
    assert_vec_eq(model.anchor(1).position, start + line / 3.0);
    assert_vec_eq(model.anchor(2).position, start + line * 2.0 / 3.0);
    assert_eq!(model.anchor(1).anchor_type, AnchorType::Untied);
    assert_vec_eq(model.anchor(1).out_control, model.anchor(1).position + gradient);
    assert_vec_eq(model.anchor(1).in_control, model.anchor(1).position - gradient);
    // Corner bleibt kollabiert
    assert_eq!(model.anchor(2).anchor_type, AnchorType::Corner);
    assert_eq!(model.anchor(2).in_control, model.anchor(2).position);
    // Endpunkte: nur der zum Lauf zeigende Handle
    assert_eq!(model.anchor(0).in_control, first_in);
    assert_vec_eq(model.anchor(0).out_control, start + gradient);
}

#[test]
fn test_straighten_coincident_endpoints_collapses() {
    let mut model = CurveModel::new();
    smooth_prim(
        &mut model,
        &[DVec3::ZERO, DVec3::new(1.0, 1.0, 0.0), DVec3::ZERO],
    );

    model.straighten_run(&[0, 1, 2]);

    let a = model.anchor(1);
    assert_vec_eq(a.position, DVec3::ZERO);
    assert_vec_eq(a.in_control, DVec3::ZERO);
    assert_vec_eq(a.out_control, DVec3::ZERO);
}

#[test]
fn test_straighten_anchors_splits_runs() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    smooth_prim(&mut model, &wave());

    // 0-1 (Lauf), 3 | 4 (anderes Prim), 6-7 (Lauf)
    let runs = model.straighten_anchors(&[7, 0, 1, 3, 4, 6]);

    assert_eq!(runs, 2);
}

#[test]
fn test_align_anchors_modes() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());

    model.align_anchors(&[1, 2], Axis::Y, AlignMode::Average);
    for i in [1, 2] {
        let a = model.anchor(i);
        assert_relative_eq!(a.position.y, 0.5);
        assert_relative_eq!(a.in_control.y, 0.5);
        assert_relative_eq!(a.out_control.y, 0.5);
    }

    model.align_anchors(&[0, 3], Axis::X, AlignMode::Max);
    assert_relative_eq!(model.anchor(0).position.x, 9.0);

    model.align_anchors(&[0, 2], Axis::Z, AlignMode::Min);
    assert_relative_eq!(model.anchor(2).position.z, 0.0);
}

#[test]
fn test_project_anchors_flattens_points() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());
    let version = model.version();

    model.project_anchors(&[2], DVec3::ZERO, DVec3::ZERO);
    assert_eq!(model.version(), version);

    model.project_anchors(&[0, 1, 2, 3], DVec3::ZERO, DVec3::new(0.0, 0.0, 2.0));
    assert!(model
        .anchors()
        .iter()
        .flat_map(|a| a.controls())
        .all(|p| p.z.abs() < 1e-12));
}

// ── Attribute ───────────────────────────────────────────────────────

#[test]
fn test_attribute_management() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave());

    assert!(model.add_attribute("width", AttributeType::FloatScale));
    assert!(!model.add_attribute("width", AttributeType::FloatScale));
    assert!(!model.add_attribute(PSCALE_ROLL_ATTRIBUTE, AttributeType::FloatScale));
    assert_eq!(model.anchor(2).attributes["width"], AttributeValue::Float(1.0));

    assert!(model
        .set_attribute_value(0, "width", AttributeValue::Int(3))
        .is_err());
    assert!(model
        .set_attribute_value(0, "missing", AttributeValue::Float(3.0))
        .is_err());

    assert!(!model.remove_attribute(PSCALE_ROLL_ATTRIBUTE));
    assert!(model.remove_attribute("width"));
    assert!(!model.anchor(2).attributes.contains_key("width"));
}

#[test]
fn test_sync_attribute_defs() {
    let mut model = CurveModel::new();
    smooth_prim(&mut model, &wave()[..2]);
    model.add_attribute("keep", AttributeType::FloatRoll);
    model.add_attribute("retype", AttributeType::FloatRoll);
    model.add_attribute("drop", AttributeType::FloatRoll);
    model
        .set_attribute_value(0, "keep", AttributeValue::Float(45.0))
        .unwrap();

    model.sync_attribute_defs(&[
        ("keep".to_string(), AttributeType::FloatRoll),
        ("retype".to_string(), AttributeType::IntegerLadder),
        ("new".to_string(), AttributeType::Orientation),
    ]);

    let names: Vec<&str> = model.attribute_defs().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["__pr", "keep", "retype", "new"]);
    let attrs = &model.anchor(0).attributes;
    assert_eq!(attrs["keep"], AttributeValue::Float(45.0));
    assert_eq!(attrs["retype"], AttributeValue::Int(0));
    assert_eq!(attrs["new"], AttributeValue::Vector([0.0, 0.0, 0.0]));
    assert!(!attrs.contains_key("drop"));
}

#[test]
fn test_interpolation_cache_ladder_and_blend() {
    let mut model = CurveModel::new();
    model.add_attribute("lvl", AttributeType::IntegerLadder);
    model.add_attribute("flvl", AttributeType::FloatLadder);
    smooth_prim(&mut model, &wave()[..3]);
    model
        .set_attribute_value(0, "lvl", AttributeValue::Int(5))
        .unwrap();
    model
        .set_attribute_value(0, "flvl", AttributeValue::Float(4.0))
        .unwrap();

    let lvl = model.anchor(1).interpolated("lvl").unwrap();
    assert_eq!(
        lvl,
        &[
            AttributeValue::Int(5),
            AttributeValue::Int(0),
            AttributeValue::Int(0)
        ]
    );
    // Erster Anker: ohne Vorgänger der eigene Wert
    let lvl = model.anchor(0).interpolated("lvl").unwrap();
    assert_eq!(lvl[0], AttributeValue::Int(5));

    // Gleitkomma-Leitern werden wie Skalare überblendet
    let flvl = model.anchor(1).interpolated("flvl").unwrap();
    match &flvl[0] {
        AttributeValue::Float(v) => assert_relative_eq!(*v, 2.0, epsilon = 1e-12),
        other => panic!("Float erwartet, war {:?}", other),
    }
    assert_eq!(flvl[1], AttributeValue::Float(1.0));
    assert_eq!(flvl[2], AttributeValue::Float(1.0));

    let pr = model.anchor(0).interpolated(PSCALE_ROLL_ATTRIBUTE).unwrap();
    assert_eq!(pr[0], AttributeValue::Pair([1.0, 0.0]));
}

// ── Laden ───────────────────────────────────────────────────────────

#[test]
fn test_replace_with_validates_ranges() {
    let mut model = CurveModel::new();
    let anchors = vec![Anchor::corner(DVec3::ZERO), Anchor::corner(DVec3::X)];

    let gap = vec![Prim::new(0, 1, "a")];
    assert!(model
        .replace_with(anchors.clone(), gap, IndexMap::new())
        .is_err());
    assert_eq!(model.anchor_count(), 0);

    let overlap = vec![Prim::new(0, 2, "a"), Prim::new(1, 2, "b")];
    assert!(model
        .replace_with(anchors.clone(), overlap, IndexMap::new())
        .is_err());

    let ok = vec![Prim::new(0, 1, "a"), Prim::new(1, 2, "b")];
    model.replace_with(anchors, ok, IndexMap::new()).unwrap();
    assert_eq!(model.prim_count(), 2);
    assert_eq!(
        model.anchor(1).attributes[PSCALE_ROLL_ATTRIBUTE],
        AttributeValue::Pair([1.0, 0.0])
    );
}

#[test]
fn test_version_increases_on_mutation() {
    let mut model = CurveModel::new();
    let v0 = model.version();
    model.append_anchor(DVec3::ZERO, None, false);
    let v1 = model.version();
    model.rename_prim(0, "renamed");
    let v2 = model.version();

    assert!(v1 > v0);
    assert!(v2 > v1);
    assert_eq!(model.prim(0).name, "renamed");
}

#[test]
fn test_anchor_tangent_and_label_position() {
    let mut model = CurveModel::new();
    model.append_anchor(DVec3::ZERO, None, false);
    model.append_anchor(DVec3::new(4.0, 0.0, 0.0), Some(0), true);
    model.append_anchor(DVec3::new(4.0, 4.0, 0.0), Some(0), true);

    // Corner: Vorgänger → Nachfolger
    assert_vec_eq(model.anchor_tangent(1), DVec3::new(1.0, 1.0, 0.0).normalize());
    assert_vec_eq(model.anchor_tangent(0), DVec3::X);
    assert_vec_eq(model.label_position(0), DVec3::new(4.0, 0.0, 0.0));

    let arrow = model.arrowhead(0).unwrap();
    assert_vec_eq(arrow.position, DVec3::new(4.0, 4.0, 0.0));
    assert_vec_eq(arrow.direction, DVec3::Y);

    model.close_prim(0, true);
    assert_vec_eq(model.label_position(0), DVec3::new(2.0, 2.0, 0.0));
    let arrow = model.arrowhead(0).unwrap();
    assert_vec_eq(arrow.position, DVec3::ZERO);
    assert_vec_eq(arrow.direction, DVec3::new(-1.0, -1.0, 0.0).normalize());

    let single = model.append_anchor(DVec3::new(9.0, 9.0, 9.0), None, false);
    assert_vec_eq(model.anchor_tangent(single), DVec3::Z);
}
