use crate::cubelet::Axis;
use crate::orientation::Euler;

pub type Matrix3 = [[f64; 3]; 3];

/// Edge function used in rasterization
pub fn edge_function(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> f64 {
    (c[0] - a[0]) * (b[1] - a[1]) - (c[1] - a[1]) * (b[0] - a[0])
}

/// Multiplies a 3x3 matrix by a 3-dimensional vector
pub fn multiply_matrix_vector(matrix: &Matrix3, vector: &[f64; 3]) -> [f64; 3] {
    let mut result = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            result[i] += matrix[i][j] * vector[j];
        }
    }
    result
}

/// Multiplies two 3x3 matrices
pub fn multiply_matrices(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = [[0.0; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }
    result
}

/// Right-handed rotation of `angle` radians about a principal axis
pub fn axis_rotation(axis: Axis, angle: f64) -> Matrix3 {
    let (sin_a, cos_a) = angle.sin_cos();
    match axis {
        Axis::X => [[1.0, 0.0, 0.0], [0.0, cos_a, -sin_a], [0.0, sin_a, cos_a]],
        Axis::Y => [[cos_a, 0.0, sin_a], [0.0, 1.0, 0.0], [-sin_a, 0.0, cos_a]],
        Axis::Z => [[cos_a, -sin_a, 0.0], [sin_a, cos_a, 0.0], [0.0, 0.0, 1.0]],
    }
}

/// Rotation matrix for pitch, then yaw, then roll applied in X, Y, Z order
pub fn euler_matrix(euler: Euler) -> Matrix3 {
    let x = axis_rotation(Axis::X, euler.pitch);
    let y = axis_rotation(Axis::Y, euler.yaw);
    let z = axis_rotation(Axis::Z, euler.roll);
    multiply_matrices(&multiply_matrices(&x, &y), &z)
}

pub fn add(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let length = dot(&v, &v).sqrt();
    if length == 0.0 {
        return v;
    }
    [v[0] / length, v[1] / length, v[2] / length]
}

/// Calculates the light intensity based on the normal vector and light position
pub fn calculate_light_intensity(
    normal: &[f64; 3],
    position: &[f64; 3],
    light_pos: &[f64; 3],
) -> f64 {
    let light_dir = normalize([
        light_pos[0] - position[0],
        light_pos[1] - position[1],
        light_pos[2] - position[2],
    ]);
    dot(normal, &light_dir).max(0.1) // Ensure a minimum ambient light
}

/// Highlight strength for a viewer looking along -z.
///
/// Metalness scales the highlight, roughness widens and dims it.
pub fn calculate_specular(
    normal: &[f64; 3],
    position: &[f64; 3],
    light_pos: &[f64; 3],
    metalness: f64,
    roughness: f64,
) -> f64 {
    let light_dir = normalize([
        light_pos[0] - position[0],
        light_pos[1] - position[1],
        light_pos[2] - position[2],
    ]);
    let view_dir = [0.0, 0.0, 1.0];
    let half = normalize(add(&light_dir, &view_dir));
    let shininess = 2.0 + (1.0 - roughness.clamp(0.0, 1.0)) * 62.0;
    dot(normal, &half).max(0.0).powf(shininess) * metalness.clamp(0.0, 1.0)
}

/// Applies lighting to a color, adding `highlight` on top as white
pub fn apply_lighting(color: [u8; 3], intensity: f64, highlight: f64) -> [u8; 3] {
    color.map(|channel| (channel as f64 * intensity + 255.0 * highlight).min(255.0) as u8)
}
