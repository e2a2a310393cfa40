// src/app/ui/grid.rs
use eframe::egui as eg;

use crate::app::filters;

pub const H_SPACING: f32 = 8.0;
pub const V_SPACING: f32 = 12.0;

const CARD_W: f32 = 200.0;
const SYNOPSIS_CLAMP_CHARS: usize = 140;

fn draw_corner_badge(p: &eg::Painter, rect: eg::Rect, label: &str) {
    if label.is_empty() {
        return;
    }
    let pad = 6.0;
    let r = eg::Rect::from_min_size(
        eg::pos2(rect.right() - pad - 64.0, rect.top() + pad),
        eg::vec2(64.0, 20.0),
    );

    p.rect_filled(
        r,
        eg::Rounding::same(6.0),
        eg::Color32::from_rgb(34, 139, 34),
    );
    p.text(
        r.center(),
        eg::Align2::CENTER_CENTER,
        label,
        eg::FontId::proportional(12.0),
        eg::Color32::WHITE,
    );
}

fn clamp_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}

impl crate::app::ShelfApp {
    pub(crate) fn ui_render_grid(&mut self, ui: &mut eg::Ui, ctx: &eg::Context) {
        let indices = filters::visible_indices(self.store.films(), &self.query);

        let mut uploads_left = super::super::MAX_UPLOADS_PER_FRAME;

        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if indices.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.label("No films match the current filters.");
                    });
                    return;
                }

                let avail = ui.available_width();
                let cols = ((avail + H_SPACING) / (CARD_W + H_SPACING)).floor().max(1.0) as usize;

                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = eg::vec2(H_SPACING, V_SPACING);

                    for (col, &idx) in indices.iter().enumerate() {
                        if col > 0 && col % cols == 0 {
                            ui.end_row();
                        }
                        self.ui_render_card(ui, ctx, idx, &mut uploads_left);
                    }

                    ui.end_row();
                });
            });
    }

    fn ui_render_card(
        &mut self,
        ui: &mut eg::Ui,
        ctx: &eg::Context,
        idx: usize,
        uploads_left: &mut usize,
    ) {
        let Some(film) = self.store.films().get(idx).cloned() else {
            return;
        };

        if *uploads_left > 0 && self.try_lazy_upload(ctx, &film.poster_url) {
            *uploads_left -= 1;
        }

        let poster_h = CARD_W * 1.5;
        let card_h = poster_h + 220.0;

        ui.allocate_ui_with_layout(
            eg::vec2(CARD_W, card_h),
            eg::Layout::top_down(eg::Align::Min),
            |ui| {
                ui.set_min_size(eg::vec2(CARD_W, card_h));
                ui.set_max_width(CARD_W);

                // Poster
                let (poster_rect, _resp) =
                    ui.allocate_exact_size(eg::vec2(CARD_W, poster_h), eg::Sense::hover());
                if let Some(tex) = self.images.get(&film.poster_url) {
                    ui.painter().image(
                        tex.id(),
                        poster_rect,
                        eg::Rect::from_min_max(eg::pos2(0.0, 0.0), eg::pos2(1.0, 1.0)),
                        eg::Color32::WHITE,
                    );
                } else {
                    ui.painter()
                        .rect_filled(poster_rect, 6.0, eg::Color32::from_gray(40));
                }
                if film.watched {
                    draw_corner_badge(ui.painter(), poster_rect, "✔ Watched");
                }

                // Title + meta
                ui.add(
                    eg::Label::new(eg::RichText::new(&film.title).size(15.0).strong()).wrap(),
                );
                ui.label(
                    eg::RichText::new(format!("{} • {}", film.release_date, film.running_time))
                        .weak()
                        .size(12.0),
                );
                ui.label(
                    eg::RichText::new(format!("★ {}%", film.rt_score))
                        .color(eg::Color32::GOLD)
                        .size(13.0),
                );

                // Synopsis with expand/collapse
                let expanded = self.expanded_synopsis.contains(&film.id);
                if expanded {
                    eg::ScrollArea::vertical()
                        .id_source(("synopsis", &film.id))
                        .max_height(96.0)
                        .show(ui, |ui| {
                            ui.label(eg::RichText::new(&film.synopsis).size(12.0));
                        });
                } else {
                    ui.label(
                        eg::RichText::new(clamp_chars(&film.synopsis, SYNOPSIS_CLAMP_CHARS))
                            .size(12.0),
                    );
                }
                if film.synopsis.chars().count() > SYNOPSIS_CLAMP_CHARS {
                    let link = if expanded { "Read less" } else { "Read more" };
                    if ui.link(eg::RichText::new(link).size(11.0)).clicked() {
                        if expanded {
                            self.expanded_synopsis.remove(&film.id);
                        } else {
                            self.expanded_synopsis.insert(film.id.clone());
                        }
                    }
                }

                ui.label(
                    eg::RichText::new(format!("Director: {}", film.director))
                        .size(11.0)
                        .weak(),
                );
                ui.label(
                    eg::RichText::new(format!("Producer: {}", film.producer))
                        .size(11.0)
                        .weak(),
                );

                // Actions pinned to the card bottom
                ui.with_layout(eg::Layout::bottom_up(eg::Align::Min), |ui| {
                    ui.horizontal(|ui| {
                        let watched_label = if film.watched { "✔ Watched" } else { "Watched" };
                        if ui.small_button(watched_label).clicked() {
                            self.store.toggle_watched(&film.id);
                        }

                        let fav_label = if film.favorite { "♥ Favorite" } else { "♡ Favorite" };
                        if ui.small_button(fav_label).clicked() {
                            self.store.toggle_favorite(&film.id);
                        }

                        let notes_label = if film.has_notes { "Edit notes" } else { "Add notes" };
                        if ui.small_button(notes_label).clicked() {
                            self.open_notes_modal(&film);
                        }
                    });
                });
            },
        );
    }
}
