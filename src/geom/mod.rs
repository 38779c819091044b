mod centerline;
mod core;
mod sector;
mod tube;

pub use centerline::{
    ArcPlane, BendMark, CenterlinePlan, MarkEmit, MarkKind, PathSample, Primitive,
    SamplingOptions, generate_path, region_center_index,
};
pub use core::{Point3, Rgba, Tolerance, Vec3};
pub use sector::{SectorError, SectorMesh, generate_sector};
pub use tube::{RangeError, TubeError, TubeMesh, TubeOptions, build_tube, color_range, extract_range};

#[cfg(test)]
mod tests;
