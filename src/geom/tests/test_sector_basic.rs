use crate::geom::{SectorError, SectorMesh, generate_sector};

#[test]
fn zero_sweep_is_a_valid_empty_mesh() {
    let mut mesh = SectorMesh::default();
    generate_sector(&mut mesh, 1.0, 0.0, 5.0).expect("zero sweep is legal");

    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn quarter_sector_fans_at_the_requested_resolution() {
    let mut mesh = SectorMesh::default();
    generate_sector(&mut mesh, 2.0, 90.0, 5.0).expect("sector should build");

    // 18 steps of 5° plus the shared center vertex.
    assert_eq!(mesh.triangle_count(), 18);
    assert_eq!(mesh.vertex_count(), 1 + 19);

    assert_eq!(mesh.positions[0], [0.0, 0.0, 0.0]);
    let first = mesh.positions[1];
    assert!((first[0] - 2.0).abs() < 1e-12 && first[1].abs() < 1e-12);
    let last = *mesh.positions.last().unwrap();
    assert!(last[0].abs() < 1e-9 && (last[1] - 2.0).abs() < 1e-9);

    assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
    assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
}

#[test]
fn ragged_sweep_lands_exactly_on_the_final_angle() {
    let mut mesh = SectorMesh::default();
    generate_sector(&mut mesh, 1.0, 33.0, 10.0).expect("sector should build");

    // 33° at 10° steps tessellates into 4 shortened segments.
    assert_eq!(mesh.triangle_count(), 4);
    let last = *mesh.positions.last().unwrap();
    let angle = (33.0_f64).to_radians();
    assert!((last[0] - angle.cos()).abs() < 1e-12);
    assert!((last[1] - angle.sin()).abs() < 1e-12);
}

#[test]
fn regeneration_replaces_previous_contents() {
    let mut mesh = SectorMesh::default();
    generate_sector(&mut mesh, 1.0, 180.0, 5.0).unwrap();
    let large = mesh.vertex_count();

    generate_sector(&mut mesh, 1.0, 20.0, 5.0).unwrap();
    assert!(mesh.vertex_count() < large);
    assert_eq!(mesh.triangle_count(), 4);
}

#[test]
fn invalid_requests_fail_loudly() {
    let mut mesh = SectorMesh::default();

    assert!(matches!(
        generate_sector(&mut mesh, 0.0, 90.0, 5.0),
        Err(SectorError::InvalidRadius)
    ));
    assert!(matches!(
        generate_sector(&mut mesh, 1.0, -1.0, 5.0),
        Err(SectorError::InvalidSweep)
    ));
    assert!(matches!(
        generate_sector(&mut mesh, 1.0, 361.0, 5.0),
        Err(SectorError::InvalidSweep)
    ));
    assert!(matches!(
        generate_sector(&mut mesh, 1.0, 90.0, 0.0),
        Err(SectorError::InvalidStep)
    ));
}
