// src/app/ui/mod.rs
pub mod grid;
pub mod modal;
pub mod topbar;

use eframe::egui as eg;

impl crate::app::ShelfApp {
    // Keep splash here; it's tiny and used early.
    pub(crate) fn ui_render_splash(&self, ui: &mut eg::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Studio Ghibli Collection");
            ui.label("Explore the films. Mark your favorites and keep track of what you've watched.");
            ui.add_space(12.0);
            ui.add(eg::Spinner::new().size(16.0));
            ui.separator();
            if !self.loading_message.is_empty() {
                ui.label(&self.loading_message);
            }
            ui.monospace(format!(
                "Cache: {}",
                crate::app::cache::cache_dir().display()
            ));
        });
    }

    pub(crate) fn ui_render_fetch_error(&self, ui: &mut eg::Ui) {
        let Some(err) = self.store.load_error() else {
            return;
        };
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Catalog unavailable");
            ui.add_space(8.0);
            ui.label(eg::RichText::new(err).color(eg::Color32::LIGHT_RED));
            ui.add_space(8.0);
            ui.label("Check the connection and restart the app to try again.");
        });
    }
}
