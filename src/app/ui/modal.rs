// src/app/ui/modal.rs — notes & rating editor
use eframe::egui as eg;

use crate::app::data::Film;
use crate::app::NotesDraft;

impl crate::app::ShelfApp {
    pub(crate) fn open_notes_modal(&mut self, film: &Film) {
        self.notes_draft = Some(NotesDraft {
            film_id: film.id.clone(),
            film_title: film.title.clone(),
            notes: film.notes.clone(),
            rating: film.user_rating,
            error: None,
        });
    }

    pub(crate) fn ui_render_notes_modal(&mut self, ctx: &eg::Context) {
        let Some(mut draft) = self.notes_draft.take() else {
            return;
        };

        let mut open = true;
        let mut close_requested = false;

        eg::Window::new(format!("Notes — {}", draft.film_title))
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(eg::RichText::new("Your rating:").strong());
                ui.horizontal(|ui| {
                    for star in 1..=5u8 {
                        let symbol = if star <= draft.rating { "★" } else { "☆" };
                        if ui
                            .selectable_label(false, eg::RichText::new(symbol).size(20.0))
                            .clicked()
                        {
                            // Clicking the current star clears the rating.
                            draft.rating = if draft.rating == star { 0 } else { star };
                        }
                    }
                    let caption = if draft.rating == 0 {
                        "Not rated".to_string()
                    } else {
                        format!("{}/5", draft.rating)
                    };
                    ui.label(eg::RichText::new(caption).weak());
                });

                ui.add_space(6.0);
                ui.label(eg::RichText::new("Your notes:").strong());
                ui.add(
                    eg::TextEdit::multiline(&mut draft.notes)
                        .desired_rows(5)
                        .desired_width(f32::INFINITY)
                        .hint_text("Write your notes here…"),
                );

                if let Some(err) = &draft.error {
                    ui.label(eg::RichText::new(err).color(eg::Color32::LIGHT_RED));
                }

                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    if ui.button("Save notes").clicked() {
                        match self
                            .store
                            .save_notes(&draft.film_id, &draft.notes, draft.rating)
                        {
                            Ok(()) => close_requested = true,
                            // Keep the window open so the user can fix it.
                            Err(err) => draft.error = Some(err.to_string()),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        close_requested = true;
                    }
                });
            });

        if open && !close_requested {
            self.notes_draft = Some(draft);
        }
    }
}
