//! Scene viewport: painter-drawn photos, ornaments and the star, plus
//! pointer input (click, drag to orbit, wheel to zoom).
//!
//! There is no depth buffer. Every item is projected, tagged with its view
//! depth, and the shapes are painted back to front.

use eframe::egui;
use egui::epaint::Vertex;
use egui::{Color32, Pos2, Rect, Shape, Stroke};

use galaxy_tree::animate::Pose;
use galaxy_tree::camera::CameraRig;
use galaxy_tree::interaction::PickTarget;
use galaxy_tree::math::{Euler, Vec3};
use galaxy_tree::scene::{Decoration, ItemKind, ShapeKind};

use super::GalaxyApp;

pub const BACKGROUND: Color32 = Color32::from_rgb(5, 5, 5);
const FRAME_COLOR: Color32 = Color32::from_rgb(253, 253, 253);
const PLACEHOLDER: Color32 = Color32::from_rgb(60, 60, 66);
const STAR_GOLD: Color32 = Color32::from_rgb(255, 215, 0);

/// Polaroid frame half extents and the photo window inside it
const FRAME_HALF: (f32, f32) = (0.6, 0.75);
const PHOTO_HALF: f32 = 0.5;
const PHOTO_LIFT: f32 = 0.1;
const ORNAMENT_RADIUS: f32 = 0.35;
const STAR_RADIUS: f32 = 0.5;

/// Radians per dragged pixel
const ORBIT_SPEED: f32 = 0.005;
/// Zoom factor exponent per scrolled point
const ZOOM_SPEED: f32 = 0.002;

/// Pixel position → NDC (y up).
fn to_ndc(rect: Rect, p: Pos2) -> [f32; 2] {
    let c = rect.center();
    [
        (p.x - c.x) / (rect.width() * 0.5),
        -(p.y - c.y) / (rect.height() * 0.5),
    ]
}

/// NDC → pixel position.
fn to_screen(rect: Rect, ndc: [f32; 2]) -> Pos2 {
    let c = rect.center();
    egui::pos2(
        c.x + ndc[0] * rect.width() * 0.5,
        c.y - ndc[1] * rect.height() * 0.5,
    )
}

/// Project a local-space quad of `pose` onto the screen.
fn project_quad(cam: &CameraRig, rect: Rect, pose: &Pose, corners: [Vec3; 4]) -> Option<[Pos2; 4]> {
    let aspect = rect.width() / rect.height();
    let orient = pose.rotation.to_quat();
    let mut out = [Pos2::ZERO; 4];
    for (dst, local) in out.iter_mut().zip(corners) {
        let world = pose.position + orient * (local * pose.scale);
        *dst = to_screen(rect, cam.project(world, aspect)?.ndc);
    }
    Some(out)
}

fn shade(rgb: [u8; 3], gain: f32) -> Color32 {
    let ch = |c: u8| (c as f32 * gain).clamp(0.0, 255.0) as u8;
    Color32::from_rgb(ch(rgb[0]), ch(rgb[1]), ch(rgb[2]))
}

impl GalaxyApp {
    pub fn draw_viewport(&mut self, ui: &mut egui::Ui, rect: Rect) {
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        self.handle_pointer(ui, &response, rect);

        let painter = ui.painter_at(rect);
        let mut layers: Vec<(f32, Vec<Shape>)> = Vec::new();
        let cam = *self.stage.camera();
        let aspect = rect.width() / rect.height();
        let mode = self.stage.mode();

        for (item, pose) in self.stage.scene().items().iter().zip(self.stage.poses()) {
            let Some(center) = cam.project(pose.position, aspect) else {
                continue;
            };
            let shapes = match &item.kind {
                ItemKind::Photo(photo) => {
                    self.photo_shapes(&cam, rect, &pose, self.textures.get(&photo.image_ref))
                }
                ItemKind::Decoration(deco) => {
                    let radius = ORNAMENT_RADIUS * pose.scale * center.scale * rect.height() * 0.5;
                    let gain = 0.8 + deco.emissive_intensity(mode);
                    ornament_shapes(deco, to_screen(rect, center.ndc), radius, gain, pose.rotation)
                }
            };
            layers.push((center.depth, shapes));
        }

        let topper = self.stage.topper();
        let now = self.stage.now();
        let star_scale = topper.scale(now);
        if star_scale > 0.01 {
            if let Some(p) = cam.project(topper.position(now), aspect) {
                let radius = STAR_RADIUS * star_scale * p.scale * rect.height() * 0.5;
                layers.push((p.depth, star_shapes(to_screen(rect, p.ndc), radius, now)));
            }
        }

        // Far first.
        layers.sort_by(|a, b| b.0.total_cmp(&a.0));
        painter.extend(layers.into_iter().flat_map(|(_, shapes)| shapes));
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, rect: Rect) {
        let aspect = rect.width() / rect.height();

        if response.dragged_by(egui::PointerButton::Primary) {
            let d = response.drag_delta();
            if d != egui::Vec2::ZERO {
                self.stage.orbit(-d.x * ORBIT_SPEED, d.y * ORBIT_SPEED);
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.stage.click([pos.x, pos.y], to_ndc(rect, pos), aspect);
            }
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.stage.zoom((-scroll * ZOOM_SPEED).exp());
            }
            if let Some(pos) = response.hover_pos() {
                if let PickTarget::Item(_) = self.stage.pick(to_ndc(rect, pos), aspect) {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
            }
        }
    }

    fn photo_shapes(
        &self,
        cam: &CameraRig,
        rect: Rect,
        pose: &Pose,
        texture: Option<&egui::TextureHandle>,
    ) -> Vec<Shape> {
        let (fw, fh) = FRAME_HALF;
        let frame = [
            Vec3::new(-fw, -fh, -0.01),
            Vec3::new(fw, -fh, -0.01),
            Vec3::new(fw, fh, -0.01),
            Vec3::new(-fw, fh, -0.01),
        ];
        let h = PHOTO_HALF;
        let window = [
            Vec3::new(-h, PHOTO_LIFT - h, 0.0),
            Vec3::new(h, PHOTO_LIFT - h, 0.0),
            Vec3::new(h, PHOTO_LIFT + h, 0.0),
            Vec3::new(-h, PHOTO_LIFT + h, 0.0),
        ];

        let (Some(frame), Some(window)) = (
            project_quad(cam, rect, pose, frame),
            project_quad(cam, rect, pose, window),
        ) else {
            return Vec::new();
        };

        let mut shapes = vec![Shape::convex_polygon(frame.to_vec(), FRAME_COLOR, Stroke::NONE)];
        match texture {
            Some(tex) => {
                let mut mesh = egui::Mesh::with_texture(tex.id());
                let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
                for (pos, uv) in window.iter().zip(uvs) {
                    mesh.vertices.push(Vertex {
                        pos: *pos,
                        uv: egui::pos2(uv[0], uv[1]),
                        color: Color32::WHITE,
                    });
                }
                mesh.add_triangle(0, 1, 2);
                mesh.add_triangle(0, 2, 3);
                shapes.push(Shape::mesh(mesh));
            }
            None => shapes.push(Shape::convex_polygon(window.to_vec(), PLACEHOLDER, Stroke::NONE)),
        }
        shapes
    }
}

fn ornament_shapes(deco: &Decoration, center: Pos2, radius: f32, gain: f32, rot: Euler) -> Vec<Shape> {
    let base = shade(deco.color.rgb(), gain);
    match deco.shape {
        ShapeKind::Sphere => vec![
            Shape::circle_filled(center, radius, base),
            Shape::circle_filled(
                center + egui::vec2(-0.3, -0.3) * radius,
                radius * 0.3,
                shade(deco.color.rgb(), gain + 0.5),
            ),
        ],
        ShapeKind::Polyhedron => {
            let spin = rot.y + rot.z;
            let points = (0..4)
                .map(|k| {
                    let a = spin + k as f32 * std::f32::consts::FRAC_PI_2;
                    // Octahedron outline: taller than wide.
                    center + egui::vec2(a.cos() * radius * 0.8, a.sin() * radius)
                })
                .collect();
            vec![Shape::convex_polygon(points, base, Stroke::new(1.0, shade(deco.color.rgb(), gain + 0.3)))]
        }
    }
}

fn star_shapes(center: Pos2, radius: f32, now: f64) -> Vec<Shape> {
    let glow = Color32::from_rgba_unmultiplied(255, 215, 0, 40);
    let mut mesh = egui::Mesh::default();
    mesh.colored_vertex(center, STAR_GOLD);
    let spin = (now * 0.5).rem_euclid(std::f64::consts::TAU) as f32;
    for k in 0..10 {
        let r = if k % 2 == 0 { radius } else { radius * 0.45 };
        let a = spin + k as f32 * std::f32::consts::PI / 5.0 - std::f32::consts::FRAC_PI_2;
        mesh.colored_vertex(center + egui::vec2(a.cos() * r, a.sin() * r), STAR_GOLD);
    }
    for k in 0..10u32 {
        mesh.add_triangle(0, 1 + k, 1 + (k + 1) % 10);
    }
    vec![Shape::circle_filled(center, radius * 1.6, glow), Shape::mesh(mesh)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_round_trips_through_screen() {
        let rect = Rect::from_min_size(egui::pos2(10.0, 20.0), egui::vec2(800.0, 600.0));
        let p = egui::pos2(610.0, 95.0);
        let back = to_screen(rect, to_ndc(rect, p));
        assert!((back - p).length() < 1e-3);
        assert_eq!(to_ndc(rect, rect.center()), [0.0, 0.0]);
        assert!(to_ndc(rect, rect.left_top())[1] > 0.0);
    }
}
