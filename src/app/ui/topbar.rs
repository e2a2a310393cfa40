// src/app/ui/topbar.rs
use eframe::egui as eg;

use crate::app::filters::{RatingBucket, SortKey};

impl crate::app::ShelfApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal_wrapped(|ui| {
            // Search
            ui.add(
                eg::TextEdit::singleline(&mut self.query.search)
                    .hint_text("Search movies…")
                    .desired_width(200.0),
            );
            ui.checkbox(&mut self.query.include_synopsis, "Search synopsis");

            ui.separator();

            // Annotation filters (AND-combined while active)
            ui.toggle_value(&mut self.query.filters.watched, "Watched");
            ui.toggle_value(&mut self.query.filters.favorites, "Favorites");
            ui.toggle_value(&mut self.query.filters.with_notes, "With notes");
            ui.toggle_value(&mut self.query.filters.rating, "Rating");

            if self.query.filters.rating {
                eg::ComboBox::from_id_source("rating_bucket_combo")
                    .selected_text(self.query.rating_bucket.label())
                    .show_ui(ui, |ui| {
                        for bucket in RatingBucket::ALL {
                            ui.selectable_value(
                                &mut self.query.rating_bucket,
                                bucket,
                                bucket.label(),
                            );
                        }
                    });
            }

            ui.separator();

            // Sort
            eg::ComboBox::from_id_source("sort_by_combo")
                .selected_text(format!("Sort: {}", self.query.sort_key.label()))
                .show_ui(ui, |ui| {
                    for key in SortKey::ALL {
                        ui.selectable_value(&mut self.query.sort_key, key, key.label());
                    }
                });

            ui.separator();

            if ui
                .button("Clear filters")
                .on_hover_text("Reset search, filters and sort. Your annotations stay put.")
                .clicked()
            {
                self.query.clear();
            }
        });
    }
}
