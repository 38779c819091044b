use crate::geom::{
    ArcPlane, CenterlinePlan, MarkEmit, MarkKind, Primitive, SamplingOptions, generate_path,
    region_center_index,
};

fn options() -> SamplingOptions {
    SamplingOptions {
        run_step: 0.25,
        arc_step_degrees: 5.0,
    }
}

fn arc(plane: ArcPlane, sweep_degrees: f64, marks: MarkEmit) -> Primitive {
    Primitive::Arc {
        plane,
        sweep_degrees,
        radius: 1.0,
        marks,
    }
}

#[test]
fn straight_run_samples_to_the_exact_endpoint() {
    let plan = CenterlinePlan {
        primitives: vec![Primitive::Run { length: 1.0 }],
    };

    let (samples, marks) = generate_path(&plan, options());

    assert_eq!(samples.len(), 5, "initial sample plus four steps");
    assert!(marks.is_empty());

    let last = samples.last().unwrap();
    assert!(last.point.distance_to(crate::geom::Point3::new(1.0, 0.0, 0.0)) < 1e-12);
    assert!((last.forward.x - 1.0).abs() < 1e-12);
}

#[test]
fn pitch_arc_rises_toward_the_radial_direction() {
    let plan = CenterlinePlan {
        primitives: vec![arc(ArcPlane::Pitch, 90.0, MarkEmit::StartEnd)],
    };

    let (samples, marks) = generate_path(&plan, options());
    let last = samples.last().unwrap();

    // Quarter circle of radius 1 from the origin heading +X: ends at
    // (1, 0, 1) pointing straight up.
    assert!(last.point.distance_to(crate::geom::Point3::new(1.0, 0.0, 1.0)) < 1e-9);
    assert!((last.forward.z - 1.0).abs() < 1e-9);

    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].index, 0);
    assert_eq!(marks[0].kind, MarkKind::Start);
    assert_eq!(marks[1].index, samples.len() - 1);
    assert_eq!(marks[1].kind, MarkKind::End);
}

#[test]
fn negative_pitch_arc_dives() {
    let plan = CenterlinePlan {
        primitives: vec![arc(ArcPlane::Pitch, -90.0, MarkEmit::None)],
    };

    let (samples, marks) = generate_path(&plan, options());
    let last = samples.last().unwrap();

    assert!(last.point.distance_to(crate::geom::Point3::new(1.0, 0.0, -1.0)) < 1e-9);
    assert!((last.forward.z + 1.0).abs() < 1e-9);
    assert!(marks.is_empty());
}

#[test]
fn yaw_arc_turns_without_leaving_the_ground_plane() {
    let plan = CenterlinePlan {
        primitives: vec![arc(ArcPlane::Yaw, 90.0, MarkEmit::StartEnd)],
    };

    let (samples, _) = generate_path(&plan, options());
    let last = samples.last().unwrap();

    assert!(last.point.distance_to(crate::geom::Point3::new(1.0, 1.0, 0.0)) < 1e-9);
    assert!((last.forward.y - 1.0).abs() < 1e-9);
    // The radial direction is untouched by a yaw turn.
    assert!((last.radial.z - 1.0).abs() < 1e-9);
    assert!(samples.iter().all(|s| s.point.z.abs() < 1e-9));
}

#[test]
fn roll_tilts_the_bend_plane() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Roll { angle_degrees: 90.0 },
            arc(ArcPlane::Pitch, 90.0, MarkEmit::StartEnd),
        ],
    };

    let (samples, _) = generate_path(&plan, options());
    let last = samples.last().unwrap();

    // Rolled 90° about +X, the radial direction is -Y, so the "rise" of the
    // pitch arc goes sideways.
    assert!(last.point.distance_to(crate::geom::Point3::new(1.0, -1.0, 0.0)) < 1e-9);
}

#[test]
fn marks_land_exactly_on_primitive_boundaries() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Run { length: 0.5 },
            arc(ArcPlane::Pitch, 30.0, MarkEmit::StartEnd),
            Primitive::Run { length: 0.5 },
        ],
    };

    let (samples, marks) = generate_path(&plan, options());

    let lead_samples = 2; // 0.5 / 0.25
    let arc_samples = 6; // 30° / 5°
    let tail_samples = 2;
    assert_eq!(samples.len(), 1 + lead_samples + arc_samples + tail_samples);

    assert_eq!(marks[0].index, lead_samples);
    assert_eq!(marks[1].index, lead_samples + arc_samples);

    // The mark samples sit on the boundary between primitives: the start
    // mark still points along +X, the end mark along the arc's exit.
    assert!((samples[marks[0].index].forward.x - 1.0).abs() < 1e-12);
    let exit = samples[marks[1].index].forward;
    assert!((exit.z - (30.0_f64).to_radians().sin()).abs() < 1e-9);
}

#[test]
fn zero_sweep_arc_emits_degenerate_marks_without_samples() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Run { length: 0.5 },
            arc(ArcPlane::Pitch, 0.0, MarkEmit::StartEnd),
        ],
    };

    let (samples, marks) = generate_path(&plan, options());

    assert_eq!(samples.len(), 3);
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].index, marks[1].index);
    assert_eq!(marks[0].index, samples.len() - 1);
}

#[test]
fn start_only_arcs_skip_the_closing_mark() {
    let plan = CenterlinePlan {
        primitives: vec![
            arc(ArcPlane::Pitch, 15.0, MarkEmit::StartEnd),
            Primitive::Run { length: 0.5 },
            arc(ArcPlane::Pitch, -15.0, MarkEmit::StartOnly),
        ],
    };

    let (_, marks) = generate_path(&plan, options());

    let kinds: Vec<MarkKind> = marks.iter().map(|m| m.kind).collect();
    assert_eq!(kinds, vec![MarkKind::Start, MarkKind::End, MarkKind::Start]);
}

#[test]
fn mark_indices_are_non_decreasing_and_in_bounds() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Run { length: 0.3 },
            arc(ArcPlane::Pitch, 22.5, MarkEmit::StartEnd),
            Primitive::Run { length: 0.2 },
            arc(ArcPlane::Pitch, -45.0, MarkEmit::StartEnd),
            Primitive::Run { length: 0.2 },
            arc(ArcPlane::Pitch, 22.5, MarkEmit::StartEnd),
        ],
    };

    let (samples, marks) = generate_path(&plan, options());

    for pair in marks.windows(2) {
        assert!(pair[0].index <= pair[1].index);
    }
    assert!(marks.iter().all(|m| m.index < samples.len()));
}

#[test]
fn region_center_uses_the_floor_midpoint_rule() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Run { length: 0.5 },
            arc(ArcPlane::Pitch, 45.0, MarkEmit::StartEnd),
        ],
    };

    let (_, marks) = generate_path(&plan, options());
    let center = region_center_index(&marks, 0).unwrap();
    assert_eq!(
        center,
        (marks[1].index - marks[0].index) / 2 + marks[0].index
    );

    assert_eq!(region_center_index(&marks, 1), None);
}

#[test]
fn frames_stay_orthonormal_through_a_composite_path() {
    let plan = CenterlinePlan {
        primitives: vec![
            Primitive::Roll { angle_degrees: 33.0 },
            Primitive::Run { length: 0.3 },
            arc(ArcPlane::Yaw, 20.0, MarkEmit::None),
            arc(ArcPlane::Pitch, 70.0, MarkEmit::None),
        ],
    };

    let (samples, _) = generate_path(&plan, options());
    for sample in &samples {
        assert!((sample.forward.length() - 1.0).abs() < 1e-9);
        assert!((sample.radial.length() - 1.0).abs() < 1e-9);
        assert!(sample.forward.dot(sample.radial).abs() < 1e-9);
    }
}
