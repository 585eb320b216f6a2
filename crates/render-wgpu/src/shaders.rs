/// Flat-shaded room and model: ambient term plus one point light with
/// inverse-square falloff. Metalness and roughness shape a Blinn-Phong
/// highlight.
pub const SHOWROOM_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    ambient: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
    @location(3) surface: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
    @location(3) surface: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_pos = vertex.position;
    out.normal = vertex.normal;
    out.color = vertex.color;
    out.surface = vertex.surface;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var n = normalize(in.normal);
    let to_eye = uniforms.camera_pos.xyz - in.world_pos;
    if (dot(n, to_eye) < 0.0) {
        n = -n;
    }

    let metalness = clamp(in.surface.x, 0.0, 1.0);
    let roughness = clamp(in.surface.y, 0.04, 1.0);

    let to_light = uniforms.light_pos.xyz - in.world_pos;
    let dist_sq = max(dot(to_light, to_light), 1e-4);
    let l = normalize(to_light);
    let lambert = max(dot(n, l), 0.0);
    let radiance = uniforms.light_color.rgb * uniforms.light_color.w / dist_sq;

    let h = normalize(l + normalize(to_eye));
    let shininess = 2.0 / (roughness * roughness * roughness * roughness) - 2.0;
    let highlight = pow(max(dot(n, h), 0.0), max(shininess, 1.0)) * (shininess + 8.0) / 25.13;
    let specular_color = mix(vec3<f32>(0.04), in.color, metalness);
    let diffuse_color = in.color * (1.0 - metalness);

    // Ambient contributes a quarter of its nominal intensity.
    let ambient = in.color * uniforms.ambient.rgb * 0.25;
    let direct = (diffuse_color + specular_color * highlight) * radiance * lambert;
    let lit = ambient + direct;
    return vec4<f32>(min(lit, vec3<f32>(1.0)), 1.0);
}
"#;
