//! Application wiring
//!
//! Owns the bus, the task container, the touch relay, and the record
//! store, plus the screen-switching subscriptions. Screens never push
//! tasks themselves: they announce lifecycle topics, the app queues the
//! switch, and the queue drains at the top of the next frame so the task
//! list is never grown mid-dispatch.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use macroquad::prelude::{screen_height, screen_width, vec2};

use crate::config::{AppConfig, ConfigError};
use crate::event::{ConnectionSet, EventBus};
use crate::game::{GameMain, Title};
use crate::input::TouchRelay;
use crate::records::{RecordError, RecordStore};
use crate::task::TaskContainer;
use crate::ui::{parse, Drawer, WidgetConfig};

const TITLE_DOC: &str = include_str!("../assets/ui/title.ron");
const GAME_MAIN_DOC: &str = include_str!("../assets/ui/game_main.ron");

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Records(RecordError),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<RecordError> for AppError {
    fn from(e: RecordError) -> Self {
        AppError::Records(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "config: {}", e),
            AppError::Records(e) => write!(f, "records: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

#[derive(Debug, Clone, Copy)]
enum Screen {
    Title,
    GameMain,
}

pub struct App {
    config: AppConfig,
    bus: EventBus,
    tasks: TaskContainer,
    // Held for its Drop: revokes the screen-switch subscriptions.
    holder: ConnectionSet,
    relay: TouchRelay,
    drawer: Drawer,
    records: Rc<RefCell<RecordStore>>,
    queued: Rc<RefCell<Vec<Screen>>>,
    title_ui: WidgetConfig,
    game_ui: WidgetConfig,
}

impl App {
    pub fn new(config: AppConfig, record_path: PathBuf) -> Result<Self, AppError> {
        // Both widget documents are validated here, before any screen
        // exists; later screen switches can't fail.
        let title_ui = parse(TITLE_DOC)?;
        let game_ui = parse(GAME_MAIN_DOC)?;

        let mut records = RecordStore::open(record_path)?;
        records.record_startup()?;
        let records = Rc::new(RefCell::new(records));

        let bus = EventBus::new();
        let queued = Rc::new(RefCell::new(Vec::new()));
        let mut holder = ConnectionSet::new();
        for (topic, screen) in [
            ("Title:finished", Screen::GameMain),
            ("GameMain:finished", Screen::Title),
            ("GameMain:aborted", Screen::Title),
        ] {
            let queued = Rc::clone(&queued);
            holder += bus.connect(topic, move |_| queued.borrow_mut().push(screen));
        }

        let mut tasks = TaskContainer::new();
        tasks.push_back(Box::new(Title::new(&title_ui, &bus)));

        let relay = TouchRelay::new(bus.clone());

        Ok(Self {
            config,
            bus,
            tasks,
            holder,
            relay,
            drawer: Drawer::new(),
            records,
            queued,
            title_ui,
            game_ui,
        })
    }

    pub async fn load_fonts(&mut self) {
        let fonts = self.config.fonts.clone();
        for font in &fonts {
            self.drawer.load_font(&font.name, &font.path).await;
        }
    }

    pub fn update(&mut self, current_time: f64, delta_time: f64) {
        let queued: Vec<Screen> = self.queued.borrow_mut().drain(..).collect();
        for screen in queued {
            match screen {
                Screen::Title => self
                    .tasks
                    .push_back(Box::new(Title::new(&self.title_ui, &self.bus))),
                Screen::GameMain => self.tasks.push_back(Box::new(GameMain::new(
                    &self.config.game,
                    &self.config.field_camera,
                    &self.game_ui,
                    &self.bus,
                    Rc::clone(&self.records),
                ))),
            }
        }

        self.relay.update();
        self.tasks.update(current_time, delta_time);
    }

    pub fn draw(&mut self) {
        let window_size = vec2(screen_width(), screen_height());
        self.tasks.draw(&mut self.drawer, window_size);
    }
}
