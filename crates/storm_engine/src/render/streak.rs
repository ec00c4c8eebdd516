//! Per-vertex and per-fragment precipitation computations
//!
//! This module is the shader-stage contract for the particle program,
//! expressed as plain functions so the software backend can execute it and
//! the tests can probe it. A GPU implementation compiles the same math with
//! the same uniform names (`initPos`, `offsets`, `cameraPos`,
//! `forwardOffset`, `inverseDir`, `boxSize`, `snowing`, `viewProj`,
//! `prevViewProj`, varying `lenColorScale`).
//!
//! Rain particles render as two-point lines: the even vertex of a pair is
//! the drop's current bottom position, the odd vertex is where the streak
//! tip sat one frame ago under the previous view-projection. That stretches
//! each line across the drop's apparent screen motion, giving continuous
//! motion blur without temporal supersampling.

use crate::foundation::math::{utils, wrap_vec3, Mat4, Vec2, Vec3, Vec4};

/// Point size at the near end of the snow depth ramp
const SNOW_SIZE_NEAR: f32 = 9.0;
/// Point size at the far end of the snow depth ramp
const SNOW_SIZE_FAR: f32 = 1.5;
/// Streak base color, bluish white
const STREAK_COLOR: [f32; 3] = [0.7, 0.78, 0.92];
/// Streak base alpha before length attenuation
const STREAK_ALPHA: f32 = 0.45;

const W_EPSILON: f32 = 1.0e-6;

/// Uniform block for one precipitation draw
#[derive(Debug, Clone, Copy)]
pub struct StreakUniforms {
    /// Shared per-layer offset, already wrapped into the box
    pub offsets: Vec3,
    /// Camera eye position
    pub camera_pos: Vec3,
    /// Unit offset from the eye toward the box center
    pub forward_offset: Vec3,
    /// Streak direction opposite gravity + wind, scaled to streak length
    pub inverse_dir: Vec3,
    /// Wrap cube edge length
    pub box_size: f32,
    /// Snow branch selector
    pub snowing: bool,
    /// Current view-projection matrix
    pub view_proj: Mat4,
    /// Previous frame's view-projection matrix
    pub prev_view_proj: Mat4,
}

/// Output of the per-vertex stage for one vertex
#[derive(Debug, Clone, Copy)]
pub struct StreakVertex {
    /// Clip-space position
    pub clip: Vec4,
    /// Rasterized point size (meaningful for the snow branch)
    pub point_size: f32,
    /// Brightness attenuation interpolated to the fragment stage
    pub len_color_scale: f32,
}

/// Wrapped world-space position of a particle
///
/// `mod(initPos + offsets, boxSize)` re-enters the base position into the
/// cube, then the cube is anchored around the eye.
pub fn world_position(init_pos: Vec3, uniforms: &StreakUniforms) -> Vec3 {
    wrap_vec3(init_pos + uniforms.offsets, uniforms.box_size) + uniforms.camera_pos
        + uniforms.forward_offset
        - Vec3::repeat(uniforms.box_size / 2.0)
}

fn clip(matrix: &Mat4, point: Vec3) -> Vec4 {
    matrix * Vec4::new(point.x, point.y, point.z, 1.0)
}

fn ndc_xy(clip: Vec4) -> Vec2 {
    let w = if clip.w.abs() < W_EPSILON {
        W_EPSILON.copysign(clip.w + W_EPSILON)
    } else {
        clip.w
    };
    Vec2::new(clip.x / w, clip.y / w)
}

/// Per-vertex transform for the particle program
///
/// `vertex_index` is the index within the paired buffer; parity picks the
/// streak endpoint in rain mode. Snow ignores parity and emits a single
/// depth-sized point per vertex.
pub fn transform_vertex(
    init_pos: Vec3,
    vertex_index: usize,
    uniforms: &StreakUniforms,
) -> StreakVertex {
    let pos = world_position(init_pos, uniforms);

    if uniforms.snowing {
        let clip_pos = clip(&uniforms.view_proj, pos);
        // Clamp-free linear depth map; size shrinks with distance
        let depth = clip_pos.z / uniforms.box_size;
        return StreakVertex {
            clip: clip_pos,
            point_size: utils::lerp(SNOW_SIZE_NEAR, SNOW_SIZE_FAR, depth),
            len_color_scale: 1.0,
        };
    }

    let tip = pos + uniforms.inverse_dir;
    let bot_pos = clip(&uniforms.view_proj, pos);
    let top_pos = clip(&uniforms.view_proj, tip);
    let top_pos_prev = clip(&uniforms.prev_view_proj, tip);

    // Both streak directions are anchored at the current bottom position
    let bot = ndc_xy(bot_pos);
    let dir = ndc_xy(top_pos) - bot;
    let dir_prev = ndc_xy(top_pos_prev) - bot;

    // Compensates brightness when the projected streak length changed a lot
    // between frames (camera rotation); defined fallback when the previous
    // streak collapsed to a point
    let prev_len = dir_prev.norm();
    let len_color_scale = if prev_len <= W_EPSILON {
        1.0
    } else {
        (dir.norm() / prev_len).clamp(0.0, 1.0)
    };

    let clip_pos = if vertex_index % 2 == 0 {
        bot_pos
    } else {
        top_pos_prev
    };

    StreakVertex {
        clip: clip_pos,
        point_size: 1.0,
        len_color_scale,
    }
}

/// Fragment shading for the rain branch
pub fn shade_streak(len_color_scale: f32) -> [f32; 4] {
    [
        STREAK_COLOR[0],
        STREAK_COLOR[1],
        STREAK_COLOR[2],
        STREAK_ALPHA * len_color_scale,
    ]
}

/// Fragment shading for the snow branch
///
/// `point_coord` is the position inside the point sprite in `[0, 1]^2`.
/// Alpha falls off radially from the center to zero at the sprite edge;
/// nothing is discarded, so the sprite reads as a soft full circle.
pub fn shade_snow(point_coord: (f32, f32)) -> [f32; 4] {
    let center_dist =
        Vec2::new(point_coord.0 - 0.5, point_coord.1 - 0.5).norm() * 2.0;
    let alpha = (1.0 - center_dist).max(0.0);
    [1.0, 1.0, 1.0, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Mat4Ext;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn uniforms(snowing: bool) -> StreakUniforms {
        let projection = Mat4::perspective(utils::deg_to_rad(70.0), 16.0 / 9.0, 0.01, 100.0);
        let view = Mat4::look_at(
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::new(0.0, 1.6, -1.0),
            Vec3::y(),
        );
        let view_proj = projection * view;
        StreakUniforms {
            offsets: Vec3::new(3.0, 27.5, 14.0),
            camera_pos: Vec3::new(0.0, 1.6, 0.0),
            forward_offset: Vec3::new(0.0, 0.0, -1.0),
            inverse_dir: Vec3::new(-0.012, 0.3, -0.0158),
            box_size: 30.0,
            snowing,
            view_proj,
            prev_view_proj: view_proj,
        }
    }

    #[test]
    fn test_world_position_stays_in_anchored_box() {
        let u = uniforms(false);
        let anchor = u.camera_pos + u.forward_offset - Vec3::repeat(u.box_size / 2.0);
        for init in [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(29.9, 29.9, 29.9),
            Vec3::new(12.0, 3.0, 25.0),
        ] {
            let pos = world_position(init, &u);
            let local = pos - anchor;
            for component in local.iter() {
                assert!((0.0..u.box_size).contains(component));
            }
        }
    }

    #[test]
    fn test_identical_view_projs_give_unit_color_scale() {
        // First frame: prevViewProj == viewProj, the streak degenerates and
        // the attenuation must be exactly 1 with no division blowup
        let u = uniforms(false);
        let vertex = transform_vertex(Vec3::new(5.0, 5.0, 5.0), 0, &u);
        assert_relative_eq!(vertex.len_color_scale, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_zero_prev_length_falls_back_to_one() {
        let mut u = uniforms(false);
        // A zero previous view-projection collapses the previous tip onto
        // the NDC origin. This particle sits dead ahead on the view axis,
        // so its bottom projects to the origin too, the previous streak has
        // zero length, and the fallback must kick in instead of dividing.
        u.prev_view_proj = Mat4::zeros();
        let vertex = transform_vertex(Vec3::new(12.0, 17.5, 27.0), 0, &u);
        assert!(vertex.len_color_scale.is_finite());
        assert_relative_eq!(vertex.len_color_scale, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_pair_parity_picks_endpoints() {
        let u = uniforms(false);
        let init = Vec3::new(8.0, 12.0, 4.0);
        let even = transform_vertex(init, 0, &u);
        let odd = transform_vertex(init, 1, &u);
        // Same base position, two different clip positions: bottom vs
        // previous-frame tip
        let expected_bot = clip(&u.view_proj, world_position(init, &u));
        let expected_tip = clip(&u.prev_view_proj, world_position(init, &u) + u.inverse_dir);
        assert_relative_eq!(even.clip, expected_bot, epsilon = EPSILON);
        assert_relative_eq!(odd.clip, expected_tip, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_shrinks_color_scale() {
        let mut u = uniforms(false);
        // Rotate the previous camera a little; the previous streak projects
        // longer or shorter than the current one, and the ratio clamps to 1
        let projection = Mat4::perspective(utils::deg_to_rad(70.0), 16.0 / 9.0, 0.01, 100.0);
        let prev_view = Mat4::look_at(
            Vec3::new(0.0, 1.6, 0.0),
            Vec3::new(0.35, 1.6, -1.0),
            Vec3::y(),
        );
        u.prev_view_proj = projection * prev_view;
        let vertex = transform_vertex(Vec3::new(5.0, 5.0, 5.0), 0, &u);
        assert!((0.0..=1.0).contains(&vertex.len_color_scale));
    }

    #[test]
    fn test_snow_point_size_shrinks_with_depth() {
        let u = uniforms(true);
        // Two particles along the view direction; wrap keeps them in the box
        let near = transform_vertex(Vec3::new(15.0, 15.0, 0.0), 0, &u);
        let far = transform_vertex(Vec3::new(15.0, 15.0, 25.0), 0, &u);
        assert!(near.clip.z < far.clip.z);
        assert!(near.point_size > far.point_size);
        assert_relative_eq!(near.len_color_scale, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_snow_ignores_pair_parity() {
        let u = uniforms(true);
        let init = Vec3::new(10.0, 20.0, 5.0);
        let even = transform_vertex(init, 0, &u);
        let odd = transform_vertex(init, 1, &u);
        assert_relative_eq!(even.clip, odd.clip, epsilon = EPSILON);
    }

    #[test]
    fn test_snow_sprite_radial_falloff() {
        let center = shade_snow((0.5, 0.5));
        let edge = shade_snow((1.0, 0.5));
        let corner = shade_snow((0.0, 0.0));
        assert_relative_eq!(center[3], 1.0, epsilon = EPSILON);
        assert_relative_eq!(edge[3], 0.0, epsilon = EPSILON);
        // Corners are outside the inscribed circle but never negative
        assert_relative_eq!(corner[3], 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_streak_alpha_scales_with_attenuation() {
        let full = shade_streak(1.0);
        let dim = shade_streak(0.25);
        assert_relative_eq!(dim[3], full[3] * 0.25, epsilon = EPSILON);
        assert_eq!(full[0], dim[0]);
    }
}
