// src/app/mod.rs — app state + one-shot init + background catalog fetch

// ---- Standard lib imports ----
use std::collections::{HashMap, HashSet};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

// ---- Crates ----
use eframe::egui::{self as eg, TextureHandle};
use tracing::{info, warn};

// ---- Local modules ----
pub mod cache;
pub mod catalog;
pub mod collection;
pub mod data;
pub mod filters;
pub mod persist;
pub mod ui;

use crate::config::load_config;
use collection::{CollectionStore, InitOutcome};
use data::Film;
use filters::Query;

// ---- Tunables ----
/// Poster loads allowed per frame; keeps scrolling smooth while artwork
/// trickles in from the cache or the network.
const MAX_UPLOADS_PER_FRAME: usize = 2;

/// Outcome of the background catalog fetch.
enum FetchMsg {
    Done(Vec<Film>),
    Error(String),
}

/// Working copy behind the notes modal; lives only while the window is open.
pub(crate) struct NotesDraft {
    pub(crate) film_id: String,
    pub(crate) film_title: String,
    pub(crate) notes: String,
    pub(crate) rating: u8,
    pub(crate) error: Option<String>,
}

pub struct ShelfApp {
    // core
    pub(crate) store: CollectionStore,
    pub(crate) query: Query,

    // one-time init guard
    did_init: bool,
    fetch_started: bool,
    fetch_rx: Option<Receiver<FetchMsg>>,

    // presentation
    pub(crate) images: HashMap<String, TextureHandle>,
    pub(crate) failed_posters: HashSet<String>,
    pub(crate) expanded_synopsis: HashSet<String>,
    pub(crate) notes_draft: Option<NotesDraft>,
    pub(crate) loading_message: String,
}

impl Default for ShelfApp {
    fn default() -> Self {
        Self {
            store: CollectionStore::at_default_path(),
            query: Query::default(),

            did_init: false,
            fetch_started: false,
            fetch_rx: None,

            images: HashMap::new(),
            failed_posters: HashSet::new(),
            expanded_synopsis: HashSet::new(),
            notes_draft: None,
            loading_message: String::new(),
        }
    }
}

// ---------- methods ----------
impl ShelfApp {
    /// Spawn the one-shot catalog fetch. The thread owns the sender; a
    /// receiver dropped by teardown just makes the final send a no-op.
    fn start_fetch(&mut self) {
        if self.fetch_started {
            return;
        }
        self.fetch_started = true;
        self.loading_message = "Fetching film catalog…".into();

        let url = load_config().catalog_url;
        let (tx, rx) = mpsc::channel::<FetchMsg>();
        self.fetch_rx = Some(rx);

        std::thread::spawn(move || {
            let msg = match catalog::fetch_catalog(&url) {
                Ok(films) => FetchMsg::Done(films),
                Err(err) => FetchMsg::Error(err.to_string()),
            };
            let _ = tx.send(msg);
        });
    }

    fn poll_fetch(&mut self, ctx: &eg::Context) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(FetchMsg::Done(films)) => {
                info!("catalog fetch done: {} films", films.len());
                // The store drops the result if a saved collection won.
                self.store.adopt_fetched(films);
                self.fetch_rx = None;
                ctx.request_repaint();
            }
            Ok(FetchMsg::Error(err)) => {
                self.store.mark_fetch_failed(err);
                self.fetch_rx = None;
                ctx.request_repaint();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.fetch_rx = None;
            }
        }
    }

    /// Make the poster for `url` available as a texture if it isn't yet.
    /// Returns true when this call did the work (counts against the
    /// per-frame budget).
    pub(crate) fn try_lazy_upload(&mut self, ctx: &eg::Context, url: &str) -> bool {
        if url.is_empty() || self.images.contains_key(url) || self.failed_posters.contains(url) {
            return false;
        }

        let key = cache::url_to_cache_key(url);
        let path = match cache::find_by_key(&key) {
            Some(p) => p,
            None => match cache::download_and_store(url, &key) {
                Ok(p) => p,
                Err(e) => {
                    warn!("poster fetch failed: {e}");
                    self.failed_posters.insert(url.to_string());
                    return true;
                }
            },
        };

        match cache::load_rgba(&path) {
            Ok((w, h, bytes)) => {
                let img = eg::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &bytes);
                let tex = ctx.load_texture(key, img, eg::TextureOptions::LINEAR);
                self.images.insert(url.to_string(), tex);
            }
            Err(e) => {
                warn!("poster decode failed: {e}");
                self.failed_posters.insert(url.to_string());
            }
        }
        true
    }
}

// ========== App impl ==========
impl eframe::App for ShelfApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        // First frame
        if !self.did_init {
            self.did_init = true;
            match self.store.initialize() {
                InitOutcome::Restored(n) => info!("restored {n} films from disk"),
                InitOutcome::NeedsFetch => self.start_fetch(),
                InitOutcome::AlreadyInitialized => {}
            }
        }

        self.poll_fetch(ctx);

        // Splash (or error banner) until the collection exists
        if !self.store.is_initialized() {
            // keep polling the fetch channel while it's in flight
            if self.fetch_rx.is_some() {
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            eg::CentralPanel::default().show(ctx, |ui| {
                if self.store.load_error().is_some() {
                    self.ui_render_fetch_error(ui);
                } else {
                    self.ui_render_splash(ui);
                }
            });
            return;
        }

        // ---- Main UI ----
        eg::CentralPanel::default().show(ctx, |ui| {
            self.ui_render_topbar(ui);
            ui.separator();
            self.ui_render_grid(ui, ctx);
        });

        self.ui_render_notes_modal(ctx);
    }
}
