//! YTS Movie Browser
//! A cross-platform desktop client for the YTS movie catalog

// Hide console window on Windows release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

mod api;
mod config;
mod detail;
mod favorites;
mod listing;
mod models;

use api::*;
use config::*;
use detail::{DetailRequest, DetailState};
use favorites::FavoritesStore;
use listing::{ListingConfig, ListingPhase, ListingRequest, ListingState};
use models::*;

// Genres the catalog understands, as offered by the site's own filter
const GENRES: &[&str] = &[
    "All",
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "Romance",
    "Sci-Fi",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

// Seconds of keyboard quiet before a search edit is committed
const SEARCH_DEBOUNCE_SECS: f64 = 0.4;

const FEATURED_COUNT: usize = 6;

/// Current time as HH:MM:SS for console log lines
fn timestamp_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Load application icon - a dark screen with a gold star
fn load_icon() -> egui::IconData {
    let size = 64usize;
    let mut rgba = vec![0u8; size * size * 4];

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let nx = x as f32 / size as f32;
            let ny = y as f32 / size as f32;

            // Background gradient, deep blue to near-black
            let r = (20.0 + 10.0 * ny) as u8;
            let g = (20.0 + 14.0 * ny) as u8;
            let b = (40.0 + 26.0 * ny) as u8;

            // Screen area
            let in_screen = nx >= 0.12 && nx <= 0.88 && ny >= 0.15 && ny <= 0.75;

            // Star approximated with two overlapping triangles
            let sx = (nx - 0.5) / 0.28;
            let sy = (ny - 0.45) / 0.28;
            let up = sy <= 0.55 && sy >= -0.45 && sx.abs() <= (sy + 0.45) * 0.6;
            let down = sy >= -0.55 && sy <= 0.45 && sx.abs() <= (0.45 - sy) * 0.6;
            let in_star = up || down;

            // Stand
            let in_stand = nx >= 0.40 && nx <= 0.60 && ny >= 0.78 && ny <= 0.88;

            if in_screen && in_star {
                // Gold star (#f5c518)
                rgba[idx] = 245;
                rgba[idx + 1] = 197;
                rgba[idx + 2] = 24;
                rgba[idx + 3] = 255;
            } else if in_screen {
                // Dark screen (#1a1a2e)
                rgba[idx] = 26;
                rgba[idx + 1] = 26;
                rgba[idx + 2] = 46;
                rgba[idx + 3] = 255;
            } else if in_stand {
                // Stand (#2d3748)
                rgba[idx] = 45;
                rgba[idx + 1] = 55;
                rgba[idx + 2] = 72;
                rgba[idx + 3] = 255;
            } else {
                rgba[idx] = r;
                rgba[idx + 1] = g;
                rgba[idx + 2] = b;
                rgba[idx + 3] = 255;
            }
        }
    }

    egui::IconData {
        rgba,
        width: size as u32,
        height: size as u32,
    }
}

/// Background task messages
enum TaskResult {
    ListingLoaded {
        generation: u64,
        result: MoviePage,
    },
    ListingFailed {
        generation: u64,
        message: String,
    },
    DetailLoaded {
        generation: u64,
        movie: Box<Movie>,
    },
    DetailFailed {
        generation: u64,
        message: String,
        not_found: bool,
    },
    FavoritesRefreshed {
        refreshed: Vec<Movie>,
        failed: Vec<(i64, String)>,
    },
}

/// Context for background fetch operations
struct FetchContext {
    base_url: String,
    sender: Sender<TaskResult>,
}

impl FetchContext {
    fn client(&self) -> YtsClient {
        YtsClient::new(&self.base_url)
    }
}

/// What a movie row wants done, reported back to the caller
enum RowAction {
    ToggleFavorite,
    Open,
}

fn main() -> Result<(), eframe::Error> {
    // Force X11 backend on Linux before any windowing code runs
    #[cfg(target_os = "linux")]
    {
        std::env::set_var("WINIT_UNIX_BACKEND", "x11");
        std::env::remove_var("WAYLAND_DISPLAY");
    }

    let icon = load_icon();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_icon(icon),
        vsync: true,
        hardware_acceleration: eframe::HardwareAcceleration::Preferred,
        ..Default::default()
    };

    eframe::run_native(
        "YTS Movie Browser",
        options,
        Box::new(|cc| {
            // Add emoji font support for the star/heart glyphs
            let mut fonts = egui::FontDefinitions::default();

            #[cfg(target_os = "windows")]
            {
                if let Ok(font_data) = std::fs::read("C:\\Windows\\Fonts\\seguiemj.ttf") {
                    fonts.font_data.insert(
                        "emoji".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .push("emoji".to_owned());
                }
            }

            #[cfg(target_os = "linux")]
            {
                let emoji_paths = [
                    "/usr/share/fonts/truetype/noto/NotoColorEmoji.ttf",
                    "/usr/share/fonts/noto-emoji/NotoColorEmoji.ttf",
                    "/usr/share/fonts/google-noto-emoji/NotoColorEmoji.ttf",
                    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                ];

                for path in emoji_paths {
                    if let Ok(font_data) = std::fs::read(path) {
                        fonts.font_data.insert(
                            "emoji".to_owned(),
                            egui::FontData::from_owned(font_data).into(),
                        );
                        fonts
                            .families
                            .entry(egui::FontFamily::Proportional)
                            .or_default()
                            .push("emoji".to_owned());
                        break;
                    }
                }
            }

            #[cfg(target_os = "macos")]
            {
                if let Ok(font_data) = std::fs::read("/System/Library/Fonts/Apple Color Emoji.ttc")
                {
                    fonts.font_data.insert(
                        "emoji".to_owned(),
                        egui::FontData::from_owned(font_data).into(),
                    );
                    fonts
                        .families
                        .entry(egui::FontFamily::Proportional)
                        .or_default()
                        .push("emoji".to_owned());
                }
            }

            cc.egui_ctx.set_fonts(fonts);

            let app = MovieApp::new();
            cc.egui_ctx.set_visuals(if app.config.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            Ok(Box::new(app))
        }),
    )
}

struct MovieApp {
    // State
    current_tab: Tab,
    status_message: String,

    // Background task channel
    task_receiver: Receiver<TaskResult>,
    task_sender: Sender<TaskResult>,

    // Controllers
    listing: ListingState,
    detail: DetailState,
    favorites: FavoritesStore,

    // Search box contents, committed to the listing after a debounce
    search_input: String,
    search_edited_at: Option<f64>,

    // Favorites tab state
    refreshing_favorites: bool,
    favorites_warning: Option<String>,
    show_clear_confirm: bool,

    // Settings
    show_settings: bool,
    base_url_input: String,
    config: AppConfig,

    // Console log
    console_log: Vec<String>,
}

impl MovieApp {
    fn new() -> Self {
        let (task_sender, task_receiver) = channel();
        let config = AppConfig::load();
        let listing_config = ListingConfig {
            page_size: config.page_size,
            enable_genre_filter: config.enable_genre_filter,
            enable_load_more: config.enable_load_more,
        };
        let base_url_input = config.api_base_url.clone();
        let favorites = FavoritesStore::open();

        let mut app = Self {
            current_tab: Tab::Browse,
            status_message: String::new(),
            task_receiver,
            task_sender,
            listing: ListingState::new(listing_config),
            detail: DetailState::new(),
            favorites,
            search_input: String::new(),
            search_edited_at: None,
            refreshing_favorites: false,
            favorites_warning: None,
            show_clear_confirm: false,
            show_settings: false,
            base_url_input,
            config,
            console_log: vec!["[INFO] YTS Movie Browser started".to_string()],
        };

        app.log(&format!("[INFO] Loaded {} favorites", app.favorites.len()));
        let request = app.listing.initial_load();
        app.fetch_listing(request);
        app
    }

    fn log(&mut self, message: &str) {
        let timestamp = timestamp_now();
        self.console_log.push(format!("[{}] {}", timestamp, message));
        // Keep last 500 lines
        if self.console_log.len() > 500 {
            self.console_log.remove(0);
        }
    }

    fn fetch_context(&self) -> FetchContext {
        FetchContext {
            base_url: self.config.api_base_url.clone(),
            sender: self.task_sender.clone(),
        }
    }

    fn fetch_listing(&mut self, request: ListingRequest) {
        self.status_message = if request.append {
            "Loading more movies...".to_string()
        } else {
            "Loading movies...".to_string()
        };
        self.log(&format!(
            "[INFO] Query page {} (search: '{}', genre: {})",
            request.page,
            request.search,
            request.genre.as_deref().unwrap_or("all")
        ));

        let ctx = self.fetch_context();

        thread::spawn(move || {
            let client = ctx.client();
            let result = client.list_movies(
                request.page,
                request.page_size,
                &request.search,
                request.genre.as_deref(),
            );

            let message = match result {
                Ok(result) => TaskResult::ListingLoaded {
                    generation: request.generation,
                    result,
                },
                Err(e) => TaskResult::ListingFailed {
                    generation: request.generation,
                    message: e.to_string(),
                },
            };
            let _ = ctx.sender.send(message);
        });
    }

    fn fetch_detail(&mut self, request: DetailRequest) {
        self.status_message = "Loading movie details...".to_string();
        self.log(&format!(
            "[INFO] Fetching details for movie {}",
            request.movie_id
        ));

        let ctx = self.fetch_context();

        thread::spawn(move || {
            let client = ctx.client();
            let message = match client.movie_details(request.movie_id) {
                Ok(movie) => TaskResult::DetailLoaded {
                    generation: request.generation,
                    movie: Box::new(movie),
                },
                Err(e) => TaskResult::DetailFailed {
                    generation: request.generation,
                    not_found: matches!(e, ApiError::NotFound),
                    message: e.to_string(),
                },
            };
            let _ = ctx.sender.send(message);
        });
    }

    /// Re-fetch every stored favorite and swap in the fresh records.
    /// Failures keep the cached record and are reported in a banner.
    fn refresh_favorites(&mut self) {
        if self.refreshing_favorites || self.favorites.is_empty() {
            return;
        }
        self.refreshing_favorites = true;
        self.favorites_warning = None;
        self.status_message = "Refreshing favorites...".to_string();
        self.log(&format!(
            "[INFO] Refreshing {} favorites",
            self.favorites.len()
        ));

        let ids: Vec<i64> = self.favorites.movies().iter().map(|m| m.id).collect();
        let ctx = self.fetch_context();

        thread::spawn(move || {
            let client = ctx.client();
            let mut refreshed = Vec::new();
            let mut failed = Vec::new();

            for id in ids {
                match client.movie_details(id) {
                    Ok(movie) => refreshed.push(movie),
                    Err(e) => failed.push((id, e.to_string())),
                }
            }

            let _ = ctx
                .sender
                .send(TaskResult::FavoritesRefreshed { refreshed, failed });
        });
    }

    fn toggle_favorite(&mut self, movie: Movie) {
        let title = movie.title.clone();
        let result = if self.favorites.contains(movie.id) {
            self.status_message = format!("Removed '{}' from favorites", title);
            self.favorites.remove(movie.id).map(|_| ())
        } else {
            self.status_message = format!("Added '{}' to favorites", title);
            self.favorites.add(movie).map(|_| ())
        };

        if let Err(e) = result {
            self.log(&format!("[WARN] Favorites not persisted: {}", e));
        }
    }

    fn open_detail(&mut self, movie: Movie) {
        self.current_tab = Tab::Browse;
        let request = self.detail.select(movie.id, Some(movie));
        self.fetch_detail(request);
    }

    fn commit_search(&mut self) {
        self.search_edited_at = None;
        let term = self.search_input.clone();
        if let Some(request) = self.listing.set_search(&term) {
            self.fetch_listing(request);
        }
    }

    fn is_busy(&self) -> bool {
        self.listing.is_loading() || self.detail.is_loading() || self.refreshing_favorites
    }
}

impl eframe::App for MovieApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process background task results (non-blocking)
        while let Ok(result) = self.task_receiver.try_recv() {
            match result {
                TaskResult::ListingLoaded { generation, result } => {
                    let returned = result.movies.len();
                    if self.listing.apply_success(generation, result) {
                        self.log(&format!(
                            "[INFO] Loaded {} movies ({} of {} shown)",
                            returned,
                            self.listing.movies().len(),
                            self.listing.total_count()
                        ));
                        self.status_message =
                            format!("Loaded {} movies", self.listing.movies().len());
                    } else {
                        self.log("[INFO] Discarded stale listing response");
                    }
                }
                TaskResult::ListingFailed {
                    generation,
                    message,
                } => {
                    if self.listing.apply_failure(generation, &message) {
                        self.log(&format!("[ERROR] {}", message));
                        self.status_message = format!("Error: {}", message);
                    } else {
                        self.log("[INFO] Discarded stale listing failure");
                    }
                }
                TaskResult::DetailLoaded { generation, movie } => {
                    let title = movie.title.clone();
                    if self.detail.apply_success(generation, *movie) {
                        self.log(&format!("[INFO] Loaded details for '{}'", title));
                        self.status_message = title;
                    } else {
                        self.log("[INFO] Discarded stale detail response");
                    }
                }
                TaskResult::DetailFailed {
                    generation,
                    message,
                    not_found,
                } => {
                    if self.detail.apply_failure(generation, &message, not_found) {
                        self.log(&format!("[ERROR] {}", message));
                        self.status_message = format!("Error: {}", message);
                    } else {
                        self.log("[INFO] Discarded stale detail failure");
                    }
                }
                TaskResult::FavoritesRefreshed { refreshed, failed } => {
                    self.refreshing_favorites = false;
                    let total = refreshed.len() + failed.len();

                    for movie in refreshed {
                        if let Err(e) = self.favorites.replace(movie) {
                            self.log(&format!("[WARN] Favorites not persisted: {}", e));
                        }
                    }

                    if failed.is_empty() {
                        self.log(&format!("[INFO] Refreshed {} favorites", total));
                        self.status_message = format!("Refreshed {} favorites", total);
                    } else {
                        for (id, message) in &failed {
                            self.log(&format!(
                                "[WARN] Could not refresh favorite {}: {}",
                                id, message
                            ));
                        }
                        self.favorites_warning = Some(format!(
                            "{} of {} favorites could not be refreshed; showing cached data for them",
                            failed.len(),
                            total
                        ));
                        self.status_message =
                            format!("Refreshed {} of {} favorites", total - failed.len(), total);
                    }
                }
            }
        }

        // Commit the search box after the debounce window closes
        if let Some(edited) = self.search_edited_at {
            let now = ctx.input(|i| i.time);
            if now - edited >= SEARCH_DEBOUNCE_SECS {
                self.commit_search();
            } else {
                ctx.request_repaint_after(std::time::Duration::from_millis(100));
            }
        }

        // Keep repainting while background work is in flight
        if self.is_busy() {
            ctx.request_repaint();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.is_busy() {
                    ui.spinner();
                }
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.listing.total_count() > 0 {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} movies · page {}",
                                self.listing.total_count(),
                                self.listing.page()
                            ))
                            .weak(),
                        );
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            // Tab bar
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.current_tab, Tab::Browse, "🎬 BROWSE");
                ui.selectable_value(
                    &mut self.current_tab,
                    Tab::Favorites,
                    format!("★ FAVORITES ({})", self.favorites.len()),
                );

                // Push Console and settings to the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").on_hover_text("Settings").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                    ui.selectable_value(&mut self.current_tab, Tab::Console, "🖥 CONSOLE");
                });
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("content_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    match self.current_tab {
                        Tab::Browse => {
                            if self.detail.is_open() {
                                self.show_detail_page(ui);
                            } else {
                                self.show_browse_tab(ui);
                            }
                        }
                        Tab::Favorites => self.show_favorites_tab(ui),
                        Tab::Console => self.show_console_tab(ui),
                    }
                });
        });

        self.show_settings_window(ctx);
    }
}

impl MovieApp {
    /// One listing row: favorite star, clickable title, year/rating/genres
    fn movie_row(ui: &mut egui::Ui, movie: &Movie, is_favorite: bool) -> Option<RowAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            let star = if is_favorite {
                egui::RichText::new("★").size(18.0).color(egui::Color32::GOLD)
            } else {
                egui::RichText::new("☆").size(18.0).color(egui::Color32::GRAY)
            };
            if ui
                .button(star)
                .on_hover_text(if is_favorite {
                    "Remove from favorites"
                } else {
                    "Add to favorites"
                })
                .clicked()
            {
                action = Some(RowAction::ToggleFavorite);
            }

            if ui
                .link(egui::RichText::new(&movie.title).strong())
                .clicked()
            {
                action = Some(RowAction::Open);
            }

            if movie.year > 0 {
                ui.label(egui::RichText::new(format!("({})", movie.year)).weak());
            }
            ui.label(format!("★ {:.1}", movie.rating));
            if movie.runtime > 0 {
                ui.label(egui::RichText::new(format!("{} min", movie.runtime)).weak());
            }
            if !movie.genres.is_empty() {
                ui.label(egui::RichText::new(movie.genres.join(", ")).weak().small());
            }
        });

        action
    }

    fn show_browse_tab(&mut self, ui: &mut egui::Ui) {
        // Search and genre filter row
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_input)
                    .hint_text("Search movies...")
                    .desired_width(200.0),
            );
            if response.changed() {
                self.search_edited_at = Some(ui.input(|i| i.time));
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.commit_search();
            }

            if self.listing.config().enable_genre_filter {
                ui.separator();
                let mut picked: Option<Option<String>> = None;
                egui::ComboBox::from_id_salt("genre_filter")
                    .selected_text(self.listing.genre().unwrap_or("All").to_string())
                    .show_ui(ui, |ui| {
                        for genre in GENRES {
                            let current = match self.listing.genre() {
                                Some(g) => g == *genre,
                                None => *genre == "All",
                            };
                            if ui.selectable_label(current, *genre).clicked() && !current {
                                picked = Some(if *genre == "All" {
                                    None
                                } else {
                                    Some((*genre).to_string())
                                });
                            }
                        }
                    });
                if let Some(genre) = picked {
                    if let Some(request) = self.listing.set_genre(genre.as_deref()) {
                        self.fetch_listing(request);
                    }
                }
            }
        });
        ui.separator();

        let movies: Vec<Movie> = self.listing.movies().to_vec();

        // Append failures keep the rows on screen; the banner sits above them
        if self.listing.phase() == ListingPhase::Failed {
            let message = self.listing.error().unwrap_or("Request failed").to_string();
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&message).color(egui::Color32::RED));
                if ui.button("⟲ Retry").clicked() {
                    if let Some(request) = self.listing.retry() {
                        self.fetch_listing(request);
                    }
                }
            });
            ui.separator();
        }

        if movies.is_empty() {
            if self.listing.is_loading() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                    ui.label("Loading movies...");
                });
            } else if self.listing.phase() == ListingPhase::Loaded {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("No movies found").strong().size(16.0));
                    ui.label(
                        egui::RichText::new("Try adjusting your search or filter criteria").weak(),
                    );
                });
            }
            return;
        }

        // Featured strip, only for the unfiltered listing
        if self.listing.search().is_empty() && self.listing.genre().is_none() {
            self.show_featured_strip(ui, &movies);
        }

        let mut pending_toggle: Option<Movie> = None;
        let mut pending_open: Option<Movie> = None;

        for movie in &movies {
            match Self::movie_row(ui, movie, self.favorites.contains(movie.id)) {
                Some(RowAction::ToggleFavorite) => pending_toggle = Some(movie.clone()),
                Some(RowAction::Open) => pending_open = Some(movie.clone()),
                None => {}
            }
        }

        if self.listing.config().enable_load_more && self.listing.has_more() {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                let enabled = !self.listing.is_loading();
                if ui
                    .add_enabled(enabled, egui::Button::new("Load More Movies"))
                    .clicked()
                {
                    if let Some(request) = self.listing.load_more() {
                        self.fetch_listing(request);
                    }
                }
                ui.label(
                    egui::RichText::new(format!(
                        "Showing {} of {}",
                        movies.len(),
                        self.listing.total_count()
                    ))
                    .weak(),
                );
            });
        }

        if let Some(movie) = pending_toggle {
            self.toggle_favorite(movie);
        }
        if let Some(movie) = pending_open {
            self.open_detail(movie);
        }
    }

    /// Horizontal strip of the highest-rated movies currently loaded
    fn show_featured_strip(&mut self, ui: &mut egui::Ui, movies: &[Movie]) {
        let mut featured: Vec<&Movie> = movies.iter().collect();
        featured.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        featured.truncate(FEATURED_COUNT);

        ui.label(egui::RichText::new("Featured").strong().size(16.0));
        let mut open: Option<Movie> = None;

        egui::ScrollArea::horizontal()
            .id_salt("featured_strip")
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for movie in &featured {
                        ui.group(|ui| {
                            ui.set_width(160.0);
                            ui.vertical(|ui| {
                                if ui
                                    .link(egui::RichText::new(&movie.title).strong())
                                    .clicked()
                                {
                                    open = Some((*movie).clone());
                                }
                                ui.horizontal(|ui| {
                                    if movie.year > 0 {
                                        ui.label(
                                            egui::RichText::new(movie.year.to_string()).weak(),
                                        );
                                    }
                                    ui.label(format!("★ {:.1}", movie.rating));
                                });
                            });
                        });
                    }
                });
            });

        ui.add_space(4.0);
        ui.separator();

        if let Some(movie) = open {
            self.open_detail(movie);
        }
    }

    fn show_detail_page(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("⬅ Back").clicked() {
                self.detail.close();
            }
        });
        ui.separator();

        if !self.detail.is_open() {
            return;
        }

        if self.detail.not_found() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("Movie not found").strong().size(18.0));
                ui.label(
                    egui::RichText::new("It may have been removed from the catalog").weak(),
                );
                if ui.button("⬅ Back to Browse").clicked() {
                    self.detail.close();
                }
            });
            return;
        }

        let movie = match self.detail.current() {
            Some(movie) => movie.clone(),
            None => {
                if self.detail.is_loading() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                        ui.label("Loading movie details...");
                    });
                } else if let Some(error) = self.detail.error() {
                    let message = error.to_string();
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(egui::RichText::new(&message).color(egui::Color32::RED));
                        if ui.button("⟲ Retry").clicked() {
                            if let Some(request) = self.detail.retry() {
                                self.fetch_detail(request);
                            }
                        }
                        if ui.button("⬅ Back to Browse").clicked() {
                            self.detail.close();
                        }
                    });
                }
                return;
            }
        };

        // Fetch failed but the listing record keeps the page usable
        if self.detail.is_degraded() {
            let message = self.detail.error().unwrap_or("Request failed").to_string();
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("Showing listing data only: {}", message))
                        .color(egui::Color32::YELLOW),
                );
                if ui.button("⟲ Retry").clicked() {
                    if let Some(request) = self.detail.retry() {
                        self.fetch_detail(request);
                    }
                }
            });
            ui.separator();
        }

        ui.heading(&movie.title);
        if !movie.title_long.is_empty() && movie.title_long != movie.title {
            ui.label(egui::RichText::new(&movie.title_long).weak());
        }

        ui.horizontal(|ui| {
            if movie.year > 0 {
                ui.label(movie.year.to_string());
            }
            ui.label(format!("★ {:.1}/10", movie.rating));
            if movie.runtime > 0 {
                ui.label(format!("{} min", movie.runtime));
            }
            if !movie.language.is_empty() {
                ui.label(movie.language.to_uppercase());
            }
            if !movie.mpa_rating.is_empty() {
                ui.label(egui::RichText::new(&movie.mpa_rating).weak());
            }
        });

        if !movie.genres.is_empty() {
            ui.label(egui::RichText::new(movie.genres.join(" · ")).weak());
        }
        if !movie.director.is_empty() {
            ui.label(format!("Directed by {}", movie.director));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let is_fav = self.favorites.contains(movie.id);
            let label = if is_fav {
                "♥ Remove from Favorites"
            } else {
                "♡ Add to Favorites"
            };
            if ui.button(label).clicked() {
                self.toggle_favorite(movie.clone());
            }

            if !movie.yt_trailer_code.is_empty() {
                ui.hyperlink_to(
                    "▶ Watch Trailer",
                    format!("https://www.youtube.com/watch?v={}", movie.yt_trailer_code),
                );
            }
            if !movie.large_cover_image.is_empty() {
                ui.hyperlink_to("🖼 Poster", &movie.large_cover_image);
            }
        });

        ui.add_space(8.0);
        ui.label(egui::RichText::new("Plot Summary").strong().size(15.0));
        let plot = movie.plot();
        if plot.is_empty() {
            ui.label(egui::RichText::new("No description available.").weak());
        } else {
            ui.label(plot);
        }

        if !movie.torrents.is_empty() {
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Available Qualities")
                    .strong()
                    .size(15.0),
            );
            for torrent in &movie.torrents {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&torrent.quality).strong());
                        if !torrent.kind.is_empty() {
                            ui.label(egui::RichText::new(&torrent.kind).weak());
                        }
                        if !torrent.size.is_empty() {
                            ui.label(&torrent.size);
                        }
                        if !torrent.video_codec.is_empty() {
                            ui.label(egui::RichText::new(&torrent.video_codec).weak());
                        }
                        ui.label(
                            egui::RichText::new(format!(
                                "Seeds: {} | Peers: {}",
                                torrent.seeds, torrent.peers
                            ))
                            .weak(),
                        );
                        if !torrent.url.is_empty() {
                            ui.hyperlink_to("Download", &torrent.url);
                        }
                    });
                });
            }
        }

        if movie.date_uploaded_unix > 0 {
            if let Some(uploaded) = chrono::DateTime::from_timestamp(movie.date_uploaded_unix, 0) {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("Uploaded {}", uploaded.format("%Y-%m-%d")))
                        .weak()
                        .small(),
                );
            }
        }
    }

    fn show_favorites_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Favorites");
            ui.label(egui::RichText::new(format!("{} saved", self.favorites.len())).weak());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.favorites.is_empty() {
                    if ui.button("🗑 Clear All").clicked() {
                        self.show_clear_confirm = true;
                    }
                    let enabled = !self.refreshing_favorites;
                    if ui
                        .add_enabled(enabled, egui::Button::new("⟳ Refresh"))
                        .on_hover_text("Re-fetch every favorite from the catalog")
                        .clicked()
                    {
                        self.refresh_favorites();
                    }
                }
            });
        });
        ui.separator();

        if self.show_clear_confirm {
            ui.horizontal(|ui| {
                ui.label(format!("Remove all {} favorites?", self.favorites.len()));
                if ui.button("Yes, clear").clicked() {
                    if let Err(e) = self.favorites.clear() {
                        self.log(&format!("[WARN] Favorites not persisted: {}", e));
                    }
                    self.status_message = "Favorites cleared".to_string();
                    self.show_clear_confirm = false;
                }
                if ui.button("Cancel").clicked() {
                    self.show_clear_confirm = false;
                }
            });
            ui.separator();
        }

        if let Some(warning) = self.favorites_warning.clone() {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(warning).color(egui::Color32::YELLOW));
                if ui.button("✖").on_hover_text("Dismiss").clicked() {
                    self.favorites_warning = None;
                }
            });
            ui.separator();
        }

        if self.favorites.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(egui::RichText::new("No favorites yet").strong().size(16.0));
                ui.label(
                    egui::RichText::new("Browse movies and press ☆ to save them here").weak(),
                );
                ui.add_space(8.0);
                if ui.button("🎬 Browse Movies").clicked() {
                    self.current_tab = Tab::Browse;
                }
            });
            return;
        }

        let movies: Vec<Movie> = self.favorites.movies().to_vec();
        let mut pending_toggle: Option<Movie> = None;
        let mut pending_open: Option<Movie> = None;

        for movie in &movies {
            match Self::movie_row(ui, movie, true) {
                Some(RowAction::ToggleFavorite) => pending_toggle = Some(movie.clone()),
                Some(RowAction::Open) => pending_open = Some(movie.clone()),
                None => {}
            }
        }

        if let Some(movie) = pending_toggle {
            self.toggle_favorite(movie);
        }
        if let Some(movie) = pending_open {
            self.open_detail(movie);
        }
    }

    fn show_console_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Console Log");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("🗑 Clear").clicked() {
                    self.console_log.clear();
                    self.console_log
                        .push(format!("[{}] Console cleared", timestamp_now()));
                }
            });
        });
        ui.separator();

        // Display log entries with monospace font
        egui::ScrollArea::vertical()
            .id_salt("console_scroll")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.console_log {
                    let color = if line.contains("[ERROR]") {
                        egui::Color32::RED
                    } else if line.contains("[WARN]") {
                        egui::Color32::YELLOW
                    } else if line.contains("[INFO]") {
                        egui::Color32::LIGHT_BLUE
                    } else {
                        egui::Color32::GRAY
                    };

                    ui.label(egui::RichText::new(line).monospace().color(color));
                }
            });
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                if ui
                    .checkbox(&mut self.config.dark_mode, "Dark mode")
                    .changed()
                {
                    ctx.set_visuals(if self.config.dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    });
                    self.config.save();
                }

                ui.horizontal(|ui| {
                    ui.label("Movies per page:");
                    let mut picked: Option<u32> = None;
                    egui::ComboBox::from_id_salt("page_size")
                        .selected_text(self.config.page_size.to_string())
                        .show_ui(ui, |ui| {
                            for size in [10u32, 20, 40, 50] {
                                if ui
                                    .selectable_label(
                                        self.config.page_size == size,
                                        size.to_string(),
                                    )
                                    .clicked()
                                {
                                    picked = Some(size);
                                }
                            }
                        });
                    if let Some(size) = picked {
                        if size != self.config.page_size {
                            self.config.page_size = size;
                            self.config.save();
                            if let Some(request) = self.listing.set_page_size(size) {
                                self.fetch_listing(request);
                            }
                        }
                    }
                });

                if ui
                    .checkbox(&mut self.config.enable_genre_filter, "Genre filter")
                    .changed()
                {
                    self.config.save();
                    let genre_filter = self.config.enable_genre_filter;
                    let load_more = self.config.enable_load_more;
                    self.listing.set_flags(genre_filter, load_more);
                    // An active genre must not linger behind a hidden control
                    if !genre_filter {
                        if let Some(request) = self.listing.set_genre(None) {
                            self.fetch_listing(request);
                        }
                    }
                }

                if ui
                    .checkbox(&mut self.config.enable_load_more, "Load More control")
                    .changed()
                {
                    self.config.save();
                    let genre_filter = self.config.enable_genre_filter;
                    let load_more = self.config.enable_load_more;
                    self.listing.set_flags(genre_filter, load_more);
                }

                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("API base URL:");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.base_url_input).desired_width(240.0),
                    );
                });
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        let mut url =
                            self.base_url_input.trim().trim_end_matches('/').to_string();
                        if url.is_empty() {
                            url = DEFAULT_BASE_URL.to_string();
                            self.base_url_input = url.clone();
                        }
                        self.config.api_base_url = url.clone();
                        self.config.save();
                        self.log(&format!("[INFO] API base URL set to {}", url));
                        self.status_message = "API base URL updated".to_string();
                    }
                    ui.label(egui::RichText::new("Takes effect on the next query").weak());
                });

                ui.separator();
                if ui.button("Reset to Defaults").clicked() {
                    self.config = AppConfig::default();
                    self.config.save();
                    self.base_url_input = self.config.api_base_url.clone();
                    ctx.set_visuals(egui::Visuals::dark());
                    self.listing.set_flags(true, true);
                    if let Some(request) = self.listing.set_page_size(self.config.page_size) {
                        self.fetch_listing(request);
                    }
                    self.log("All settings reset to defaults");
                }
            });

        if !open {
            self.show_settings = false;
        }
    }
}
