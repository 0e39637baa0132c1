//! Greedy meshing implementation for voxel rendering.
//!
//! For each of the three axes the chunk is swept plane by plane. Every plane
//! gets a 2D mask of the faces lying in it, and the mask is then covered with
//! as few rectangles as a single left-to-right, top-to-bottom pass can find.
//! Adjacent coplanar faces of the same type and facing collapse into one quad.

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::CHUNK_DIMENSION,
    world::World,
};

use super::{
    face::{MaskCell, Quad},
    mesh::ChunkMesh,
};

const DIM: usize = CHUNK_DIMENSION as usize;

/// Builds the mesh of the chunk at `chunk_position`.
///
/// The vertices are in chunk-local voxel units. Faces on the chunk border are
/// exposed or hidden according to the neighbouring chunk's cells.
pub fn build_chunk_mesh(world: &World, chunk_position: Point3<i32>) -> ChunkMesh {
    let mut mesh = ChunkMesh::new();
    build_chunk_mesh_into(world, chunk_position, &mut mesh);
    mesh
}

/// Same as [`build_chunk_mesh`], writing into `mesh`.
///
/// Previous contents are discarded; the allocations are reused.
pub fn build_chunk_mesh_into(world: &World, chunk_position: Point3<i32>, mesh: &mut ChunkMesh) {
    let start = Instant::now();
    mesh.clear();

    sweep_chunk(world, chunk_position, |quad| mesh.push_quad(&quad));

    debug!(
        "Meshed chunk {:?}: {} quads, {} vertices in {:?}",
        chunk_position,
        mesh.quad_count(),
        mesh.vertices.len(),
        start.elapsed()
    );
}

/// The merged quads of a chunk, in emission order.
pub fn greedy_quads(world: &World, chunk_position: Point3<i32>) -> Vec<Quad> {
    let mut quads = Vec::new();
    sweep_chunk(world, chunk_position, |quad| quads.push(quad));
    quads
}

/// Counts exposed faces one block at a time, without merging.
///
/// Each solid block of the chunk contributes one face per side whose
/// neighbour, looked up globally, is not solid.
pub fn count_exposed_faces(world: &World, chunk_position: Point3<i32>) -> usize {
    let origin = chunk_position.to_vec() * CHUNK_DIMENSION;
    let chunk = world.chunk_at(chunk_position);

    chunk
        .solid_blocks()
        .map(|(local, _)| {
            let global = origin + Vector3::new(local.x as i32, local.y as i32, local.z as i32);
            BlockSide::all()
                .into_iter()
                .filter(|side| {
                    let neighbour = global + side.normal();
                    !world.is_solid_global(neighbour.x, neighbour.y, neighbour.z)
                })
                .count()
        })
        .sum()
}

/// Runs the sweep for all three axes, handing each finished quad to `emit`.
fn sweep_chunk(world: &World, chunk_position: Point3<i32>, mut emit: impl FnMut(Quad)) {
    let origin = chunk_position.to_vec() * CHUNK_DIMENSION;
    let mut mask: Vec<Option<MaskCell>> = vec![None; DIM * DIM];

    for axis in 0..3 {
        let (u_axis, v_axis) = Quad::plane_axes(axis);

        for slice in -1..CHUNK_DIMENSION {
            // The face plane sits between cell `slice` and cell `slice + 1`.
            // A face belongs to this chunk only if its solid cell is inside it.
            let owns_behind = slice >= 0;
            let owns_ahead = slice + 1 < CHUNK_DIMENSION;

            for j in 0..DIM {
                for i in 0..DIM {
                    let mut cell = [origin.x, origin.y, origin.z];
                    cell[axis] += slice;
                    cell[u_axis] += i as i32;
                    cell[v_axis] += j as i32;
                    let behind = world.get_global(cell[0], cell[1], cell[2]);
                    cell[axis] += 1;
                    let ahead = world.get_global(cell[0], cell[1], cell[2]);

                    mask[i + j * DIM] = match (behind.is_solid(), ahead.is_solid()) {
                        (true, false) if owns_behind => {
                            Some(MaskCell::new(behind, BlockSide::from_axis(axis, true)))
                        }
                        (false, true) if owns_ahead => {
                            Some(MaskCell::new(ahead, BlockSide::from_axis(axis, false)))
                        }
                        _ => None,
                    };
                }
            }

            merge_mask(&mut mask, (slice + 1) as u16, &mut emit);
        }
    }
}

/// Covers the filled cells of `mask` with rectangles and emits them as quads
/// at plane coordinate `depth`. Consumed cells are cleared.
fn merge_mask(mask: &mut [Option<MaskCell>], depth: u16, emit: &mut impl FnMut(Quad)) {
    for j in 0..DIM {
        let mut i = 0;
        while i < DIM {
            let Some(cell) = mask[i + j * DIM] else {
                i += 1;
                continue;
            };

            let mut width = 1;
            while i + width < DIM && mask[i + width + j * DIM] == Some(cell) {
                width += 1;
            }

            let mut height = 1;
            while j + height < DIM {
                let row = (j + height) * DIM;
                if mask[row + i..row + i + width].iter().any(|c| *c != Some(cell)) {
                    break;
                }
                height += 1;
            }

            emit(Quad::new(
                cell,
                depth,
                i as u16,
                j as u16,
                width as u16,
                height as u16,
            ));

            for dy in 0..height {
                let row = (j + dy) * DIM;
                mask[row + i..row + i + width].fill(None);
            }

            i += width;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use test_case::test_case;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::terrain::TerrainGenerator;

    /// Unit faces as `(side, depth, i, j)`, expanded from merged quads.
    fn unit_faces_of_quads(quads: &[Quad]) -> Vec<(BlockSide, u16, u16, u16)> {
        quads
            .iter()
            .flat_map(|q| {
                (q.v..q.v + q.height).flat_map(move |j| {
                    (q.u..q.u + q.width).map(move |i| (q.block_side, q.depth, i, j))
                })
            })
            .collect()
    }

    /// Unit faces as `(side, depth, i, j)`, enumerated block by block.
    fn naive_unit_faces(world: &World, chunk_position: Point3<i32>) -> HashSet<(BlockSide, u16, u16, u16)> {
        let origin = chunk_position.to_vec() * CHUNK_DIMENSION;
        let mut faces = HashSet::new();
        for (local, _) in world.chunk_at(chunk_position).solid_blocks() {
            let coords = [local.x, local.y, local.z];
            for side in BlockSide::all() {
                let n = side.normal();
                let neighbour = Point3::new(
                    origin.x + coords[0] as i32 + n.x,
                    origin.y + coords[1] as i32 + n.y,
                    origin.z + coords[2] as i32 + n.z,
                );
                if world.is_solid_global(neighbour.x, neighbour.y, neighbour.z) {
                    continue;
                }
                let axis = side.axis();
                let (u_axis, v_axis) = Quad::plane_axes(axis);
                let depth = coords[axis] + usize::from(side.is_positive());
                faces.insert((
                    side,
                    depth as u16,
                    coords[u_axis] as u16,
                    coords[v_axis] as u16,
                ));
            }
        }
        faces
    }

    /// The solid block a unit face belongs to, in chunk-local coordinates.
    fn owner_of(side: BlockSide, depth: u16, i: u16, j: u16) -> [usize; 3] {
        let axis = side.axis();
        let (u_axis, v_axis) = Quad::plane_axes(axis);
        let mut p = [0usize; 3];
        p[axis] = depth as usize - usize::from(side.is_positive());
        p[u_axis] = i as usize;
        p[v_axis] = j as usize;
        p
    }

    fn random_world(seed: u64, chunks_x: i32, fill: u32) -> World {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut world = World::new(chunks_x, 1, 1);
        let size = world.size_in_blocks();
        for gz in 0..size.z {
            for gy in 0..size.y {
                for gx in 0..size.x {
                    let roll = rng.u32(0..100);
                    let block = if roll >= fill {
                        BlockType::AIR
                    } else if roll % 2 == 0 {
                        BlockType::GRASS
                    } else {
                        BlockType::STONE
                    };
                    world.set_global(gx, gy, gz, block);
                }
            }
        }
        world
    }

    fn pocket_world() -> World {
        let mut world = World::new(1, 1, 1);
        *world.chunk_at_mut(Point3::new(0, 0, 0)) =
            crate::engine_state::voxels::chunk::Chunk::solid(Point3::new(0, 0, 0), BlockType::GRASS);
        world.set_global(8, 8, 8, BlockType::AIR);
        world
    }

    #[test]
    fn empty_chunk_has_empty_mesh() {
        let world = World::new(1, 1, 1);
        let mesh = build_chunk_mesh(&world, Point3::new(0, 0, 0));
        assert!(mesh.is_empty());
        assert!(mesh.vertices.is_empty());
    }

    #[test]
    fn single_block_has_six_unit_quads() {
        let mut world = World::new(1, 1, 1);
        world.set_global(3, 4, 5, BlockType::STONE);
        let quads = greedy_quads(&world, Point3::new(0, 0, 0));
        assert_eq!(quads.len(), 6);
        assert!(quads.iter().all(|q| q.area() == 1 && q.texture_layer == 1));
        let sides: HashSet<BlockSide> = quads.iter().map(|q| q.block_side).collect();
        assert_eq!(sides.len(), 6);
    }

    #[test_case([0, 0, 0] ; "near corner")]
    #[test_case([15, 0, 0] ; "far x")]
    #[test_case([0, 15, 0] ; "far y")]
    #[test_case([0, 0, 15] ; "far z")]
    #[test_case([15, 15, 0] ; "far xy")]
    #[test_case([15, 0, 15] ; "far xz")]
    #[test_case([0, 15, 15] ; "far yz")]
    #[test_case([15, 15, 15] ; "far corner")]
    fn corner_block_keeps_all_six_faces(corner: [i32; 3]) {
        let mut world = World::new(1, 1, 1);
        world.set_global(corner[0], corner[1], corner[2], BlockType::STONE);
        let position = Point3::new(0, 0, 0);

        let quads = greedy_quads(&world, position);
        assert_eq!(quads.len(), 6);
        assert!(quads.iter().all(|q| q.area() == 1));
        assert_eq!(count_exposed_faces(&world, position), 6);

        for quad in &quads {
            let axis = quad.block_side.axis();
            let expected = corner[axis] + i32::from(quad.block_side.is_positive());
            assert_eq!(i32::from(quad.depth), expected, "{:?}", quad.block_side);
        }
        let depths: HashSet<u16> = quads.iter().map(|q| q.depth).collect();
        if corner.contains(&0) {
            assert!(depths.contains(&0));
        }
        if corner.contains(&15) {
            assert!(depths.contains(&16));
        }
    }

    #[test]
    fn pocket_in_solid_chunk_gives_twelve_quads() {
        let world = pocket_world();
        let mesh = build_chunk_mesh(&world, Point3::new(0, 0, 0));

        assert_eq!(mesh.quad_count(), 12);
        assert_eq!(mesh.vertices.len(), 48);
        assert_eq!(mesh.indices.len(), 72);

        let quads = greedy_quads(&world, Point3::new(0, 0, 0));
        let shell: Vec<&Quad> = quads.iter().filter(|q| q.area() == 256).collect();
        let pocket: Vec<&Quad> = quads.iter().filter(|q| q.area() == 1).collect();
        assert_eq!(shell.len(), 6);
        assert_eq!(pocket.len(), 6);
        assert_eq!(quads.iter().map(Quad::area).sum::<u32>(), 6 * 256 + 6);

        // Pocket walls face into the hole.
        for quad in pocket {
            let [x, y, z] = owner_of(quad.block_side, quad.depth, quad.u, quad.v);
            let n = quad.block_side.normal();
            assert_eq!(
                (x as i32 + n.x, y as i32 + n.y, z as i32 + n.z),
                (8, 8, 8)
            );
        }
    }

    #[test]
    fn vertices_stay_inside_the_chunk() {
        let world = pocket_world();
        let mesh = build_chunk_mesh(&world, Point3::new(0, 0, 0));
        let limit = CHUNK_DIMENSION as u16;
        assert!(mesh
            .vertices
            .iter()
            .all(|v| v.px <= limit && v.py <= limit && v.pz <= limit));
    }

    #[test]
    fn merged_area_matches_naive_enumeration() {
        for seed in [1, 7, 42, 1337] {
            let world = random_world(seed, 2, 45);
            for cx in 0..2 {
                let position = Point3::new(cx, 0, 0);
                let quads = greedy_quads(&world, position);
                let area: u32 = quads.iter().map(Quad::area).sum();
                assert_eq!(area as usize, count_exposed_faces(&world, position), "seed {seed}");
            }
        }
    }

    #[test]
    fn quads_cover_exactly_the_exposed_faces_once() {
        let world = random_world(99, 2, 60);
        for cx in 0..2 {
            let position = Point3::new(cx, 0, 0);
            let quads = greedy_quads(&world, position);
            let covered = unit_faces_of_quads(&quads);
            let unique: HashSet<_> = covered.iter().copied().collect();

            assert_eq!(covered.len(), unique.len(), "overlapping quads");
            assert_eq!(unique, naive_unit_faces(&world, position));
        }
    }

    #[test]
    fn quads_are_uniform_in_type() {
        let world = random_world(5, 1, 50);
        let chunk = world.chunk_at(Point3::new(0, 0, 0));
        for quad in greedy_quads(&world, Point3::new(0, 0, 0)) {
            for j in quad.v..quad.v + quad.height {
                for i in quad.u..quad.u + quad.width {
                    let [x, y, z] = owner_of(quad.block_side, quad.depth, i, j);
                    assert_eq!(chunk.get_local(x, y, z), quad.block_type);
                }
            }
            assert_eq!(quad.texture_layer, quad.block_type.texture_layer());
        }
    }

    #[test]
    fn triangles_face_outwards() {
        let world = random_world(11, 1, 40);
        let mesh = build_chunk_mesh(&world, Point3::new(0, 0, 0));
        for triangle in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| {
                let p = mesh.vertices[triangle[k] as usize].position();
                [p.x as i32, p.y as i32, p.z as i32]
            });
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let cross = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let side = mesh.vertices[triangle[0] as usize]
                .side()
                .expect("valid normal index");
            let n = side.normal();
            assert!(cross[0] * n.x + cross[1] * n.y + cross[2] * n.z > 0);
        }
    }

    #[test]
    fn hidden_chunk_border_faces_are_skipped() {
        let mut world = World::new(2, 1, 1);
        for position in [Point3::new(0, 0, 0), Point3::new(1, 0, 0)] {
            *world.chunk_at_mut(position) =
                crate::engine_state::voxels::chunk::Chunk::solid(position, BlockType::STONE);
        }
        // The shared wall between the two chunks is not exposed.
        let quads = greedy_quads(&world, Point3::new(0, 0, 0));
        assert_eq!(quads.len(), 5);
        assert!(quads.iter().all(|q| q.block_side != BlockSide::RIGHT));
    }

    #[test]
    fn terrain_world_conserves_area() {
        let mut world = World::new(3, 1, 3);
        TerrainGenerator::default().populate(&mut world);
        let positions: Vec<_> = world.chunk_positions().collect();
        for position in positions {
            let area: u32 = greedy_quads(&world, position).iter().map(Quad::area).sum();
            assert_eq!(area as usize, count_exposed_faces(&world, position));
        }
    }

    #[test]
    fn scratch_mesh_is_replaced() {
        let world = pocket_world();
        let mut mesh = build_chunk_mesh(&World::new(1, 1, 1), Point3::new(0, 0, 0));
        build_chunk_mesh_into(&world, Point3::new(0, 0, 0), &mut mesh);
        build_chunk_mesh_into(&world, Point3::new(0, 0, 0), &mut mesh);
        assert_eq!(mesh, build_chunk_mesh(&world, Point3::new(0, 0, 0)));
    }
}
