//! Custom icon drawing utilities.

use eframe::egui;

use crate::classify::CurveCategory;

/// Draw a log-strip icon: a framed lane with a wiggling curve running down it
pub fn draw_log_icon(ui: &mut egui::Ui, center: egui::Pos2, size: f32, color: egui::Color32) {
    let painter = ui.painter();
    let half = size / 2.0;
    let lane = egui::Rect::from_center_size(center, egui::vec2(size * 0.6, size));
    let stroke = egui::Stroke::new(2.0, color);

    painter.rect_stroke(lane, 3.0, stroke, egui::StrokeKind::Inside);

    let points: Vec<egui::Pos2> = (0..=8)
        .map(|i| {
            let t = i as f32 / 8.0;
            let swing = size * if i % 2 == 0 { -0.15 } else { 0.12 };
            egui::pos2(center.x + swing, center.y - half + 3.0 + t * (size - 6.0))
        })
        .collect();
    painter.add(egui::Shape::line(points, stroke));
}

/// Small colored marker for a curve category in the checklist
pub fn draw_category_marker(ui: &mut egui::Ui, category: CurveCategory) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    let color = category_color(category);
    let painter = ui.painter();

    match category {
        CurveCategory::GammaRay => {
            painter.circle_filled(rect.center(), 5.0, color);
        }
        CurveCategory::Resistivity => {
            // Two stacked bars, like a dual induction pair
            let top = egui::Rect::from_min_size(rect.min, egui::vec2(12.0, 5.0));
            painter.rect_filled(top, 1.0, color);
            painter.rect_filled(top.translate(egui::vec2(0.0, 7.0)), 1.0, color);
        }
        CurveCategory::Porosity => {
            let c = rect.center();
            painter.add(egui::Shape::convex_polygon(
                vec![
                    egui::pos2(c.x, c.y - 6.0),
                    egui::pos2(c.x + 6.0, c.y + 5.0),
                    egui::pos2(c.x - 6.0, c.y + 5.0),
                ],
                color,
                egui::Stroke::NONE,
            ));
        }
        CurveCategory::Other => {
            painter.rect_stroke(rect.shrink(1.0), 2.0, egui::Stroke::new(1.5, color), egui::StrokeKind::Inside);
        }
    }

    response.on_hover_text(category.track_name())
}

pub fn category_color(category: CurveCategory) -> egui::Color32 {
    match category {
        CurveCategory::GammaRay => egui::Color32::from_rgb(56, 142, 60),
        CurveCategory::Resistivity => egui::Color32::from_rgb(211, 47, 47),
        CurveCategory::Porosity => egui::Color32::from_rgb(30, 136, 229),
        CurveCategory::Other => egui::Color32::from_rgb(150, 150, 150),
    }
}
