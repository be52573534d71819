use iced::widget::{column, container, text, Column};
use iced::{Element, Length, Task, Theme};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod format;
mod state;
mod ui;

use config::AppConfig;
use error::CartError;
use format::BrlFormatter;
use state::cart::CartStore;
use state::data::{CartItem, Seed};
use ui::cart_view::{self, CartAction};

/// Main application state
struct CartApp {
    /// The persistent cart
    store: CartStore,
    /// Snapshot of the cart, re-read after every mutation
    items: Vec<CartItem>,
    formatter: BrlFormatter,
    /// Latest notice to display to the user
    status: String,
    /// Base directory for product images
    assets_dir: PathBuf,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked a cart control
    Cart(CartAction),
    /// Background seed file read completed
    SeedLoaded(Result<Seed, String>),
}

impl CartApp {
    fn new(store: CartStore, config: AppConfig) -> (Self, Task<Message>) {
        let mut app = CartApp {
            store,
            items: Vec::new(),
            formatter: BrlFormatter,
            status: String::new(),
            assets_dir: config.assets_dir,
        };

        // Seed only a fresh catalog
        let task = match app.store.product_count() {
            Ok(0) => match config.seed_path {
                Some(path) => {
                    info!("🌱 Loading seed from {}", path.display());
                    Task::perform(load_seed_async(path), Message::SeedLoaded)
                }
                None => {
                    match Seed::embedded() {
                        Ok(seed) => app.seed(&seed),
                        Err(err) => app.report("Embedded seed is invalid", err.into()),
                    }
                    Task::none()
                }
            },
            Ok(_) => Task::none(),
            Err(err) => {
                app.report("Could not read catalog", err);
                Task::none()
            }
        };

        app.refresh();
        info!(
            "🛒 Cart ready with {} items ({})",
            app.items.len(),
            app.store
                .path()
                .map_or_else(|| "in memory".to_string(), |p| p.display().to_string())
        );

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Cart(action) => {
                cart_view::dispatch(&action, &mut self.store);
                self.status = self.store.take_notice().unwrap_or_default();
                self.refresh();
            }
            Message::SeedLoaded(Ok(seed)) => {
                self.seed(&seed);
                self.refresh();
            }
            Message::SeedLoaded(Err(err)) => {
                warn!(error = %err, "Seed file rejected");
                self.status = format!("Could not load seed: {err}");
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let screen = cart_view::render(&self.items, &self.formatter);

        let content: Column<Message> = column![
            ui::table::view(screen, &self.assets_dir),
            text(&self.status).size(16),
        ]
        .spacing(20)
        .padding(40);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .max_width(1020)
            .center_x(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn seed(&mut self, seed: &Seed) {
        if let Err(err) = self.store.apply_seed(seed) {
            self.report("Could not apply seed", err);
        }
    }

    fn refresh(&mut self) {
        match self.store.items() {
            Ok(items) => self.items = items,
            Err(err) => self.report("Could not read cart", err),
        }
    }

    fn report(&mut self, context: &str, err: CartError) {
        warn!(error = %err, "{context}");
        self.status = format!("{context}: {err}");
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match CartStore::open(&config.db_path) {
        Ok(store) => store,
        Err(err) => {
            error!(error = %err, "Failed to open cart database");
            std::process::exit(1);
        }
    };

    iced::application("Carrinho", CartApp::update, CartApp::view)
        .theme(CartApp::theme)
        .centered()
        .run_with(move || CartApp::new(store, config))
}

/// Read and parse a seed file without blocking the UI
async fn load_seed_async(path: PathBuf) -> Result<Seed, String> {
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|err| CartError::from(err).to_string())?;
    Seed::from_json(&json).map_err(|err| CartError::from(err).to_string())
}
