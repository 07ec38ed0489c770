//! Main game mode
//!
//! One timed round: a ready overlay, a countdown HUD, a pause menu, and
//! a result overlay, all driven through the canvas by bus topics. Taps
//! grow the glade tile by tile; once the field is full they flip and
//! shuffle what is already there. The round ends when the countdown
//! expires (recorded) or the player aborts from the pause menu.

use std::cell::RefCell;
use std::rc::Rc;

use macroquad::prelude::*;

use crate::args::Arguments;
use crate::config::{FieldCameraConfig, GameConfig};
use crate::defer::Defer;
use crate::event::{ConnectionSet, EventBus};
use crate::records::RecordStore;
use crate::task::Task;
use crate::ui::{build, Canvas, DrawTarget, WidgetConfig};

use super::{FieldCamera, GameResult};

const PLACE_SCORE: i64 = 10;
const MOVE_SCORE: i64 = 15;
const TURN_SCORE: i64 = 25;

/// Cells in the spiral before taps start reworking existing tiles.
const FIELD_CELLS: usize = 49;

const TILE_SPACING: f32 = 1.1;

const WARN_COLOR: Color = Color::new(1.0, 0.25, 0.2, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Ready,
    Playing,
    Paused,
    Finished,
}

struct Tile {
    cell: (i32, i32),
    turned: bool,
}

struct PlayState {
    mode: Mode,
    remaining: f64,
    /// Last whole second pushed to the HUD.
    shown_seconds: i64,
    result: GameResult,
    scores: Vec<i64>,
    tiles: Vec<Tile>,
    rework_cursor: usize,
    finished: bool,
}

pub struct GameMain {
    bus: EventBus,
    holder: ConnectionSet,
    defer: Defer,
    canvas: Canvas,
    camera: Rc<RefCell<FieldCamera>>,
    records: Rc<RefCell<RecordStore>>,
    state: Rc<RefCell<PlayState>>,
    result_delay: f64,
}

impl GameMain {
    pub fn new(
        game: &GameConfig,
        camera_config: &FieldCameraConfig,
        ui: &WidgetConfig,
        bus: &EventBus,
        records: Rc<RefCell<RecordStore>>,
    ) -> Self {
        let mut canvas = Canvas::new(build(ui));
        let defer = Defer::new();
        let camera = Rc::new(RefCell::new(FieldCamera::new(camera_config)));
        let state = Rc::new(RefCell::new(PlayState {
            mode: Mode::Ready,
            remaining: game.limit_time,
            shown_seconds: game.limit_time.ceil() as i64,
            result: GameResult {
                limit_time: game.limit_time,
                ..Default::default()
            },
            scores: Vec::new(),
            tiles: Vec::new(),
            rework_cursor: 0,
            finished: false,
        }));
        let mut holder = ConnectionSet::new();

        // Ready overlay -> live round once the start delay runs out.
        {
            let announce = bus.clone();
            let ui = canvas.handle();
            let state = Rc::clone(&state);
            defer.add(game.start_delay, move || {
                state.borrow_mut().mode = Mode::Playing;
                ui.enable("begin", false);
                ui.enable("main", true);
                announce.signal("Game:Start", &Arguments::new());
            });
        }

        // Escape means pause or resume depending on where the round is.
        {
            let relay = bus.clone();
            let state = Rc::clone(&state);
            holder += bus.connect("menu:tapped", move |_| {
                let mode = state.borrow().mode;
                match mode {
                    Mode::Playing => relay.signal("pause:tapped", &Arguments::new()),
                    Mode::Paused => relay.signal("resume:tapped", &Arguments::new()),
                    _ => {}
                }
            });
        }

        {
            let announce = bus.clone();
            let state = Rc::clone(&state);
            canvas.connect(bus, "pause:tapped", move |ui, _| {
                state.borrow_mut().mode = Mode::Paused;
                ui.enable("main", false);
                ui.enable("pause_menu", true);
                announce.signal("GameMain:pause", &Arguments::new());
            });
        }

        {
            let announce = bus.clone();
            let state = Rc::clone(&state);
            canvas.connect(bus, "resume:tapped", move |ui, _| {
                state.borrow_mut().mode = Mode::Playing;
                ui.enable("pause_menu", false);
                ui.enable("main", true);
                announce.signal("GameMain:resume", &Arguments::new());
            });
        }

        // Abort only makes sense from the pause menu.
        {
            let announce = bus.clone();
            let state = Rc::clone(&state);
            let records = Rc::clone(&records);
            canvas.connect(bus, "abort:tapped", move |_, _| {
                {
                    let mut state = state.borrow_mut();
                    if state.mode != Mode::Paused {
                        return;
                    }
                    state.mode = Mode::Finished;
                    state.finished = true;
                }
                if let Err(e) = records.borrow_mut().record_abort() {
                    eprintln!("records: save failed: {}", e);
                }
                announce.signal("GameMain:aborted", &Arguments::new());
            });
        }

        // Countdown readout, red when time runs short.
        {
            let warn_time = game.warn_time;
            canvas.connect(bus, "Game:UI", move |ui, args| {
                let seconds = args.float("remaining_time").ceil().max(0.0) as i64;
                ui.set_param(
                    "main:time_remain",
                    "text",
                    format!("{}'{:02}", seconds / 60, seconds % 60),
                );
                let color = if seconds as f64 <= warn_time {
                    WARN_COLOR
                } else {
                    WHITE
                };
                ui.set_param("main:time_remain", "color", color);
            });
        }

        // Score total plus the trailing gains.
        canvas.connect(bus, "Game:Scores", move |ui, args| {
            let scores = args.ints("scores");
            let total: i64 = scores.iter().sum();
            ui.set_param("main:score", "text", format!("{}", total));
            let recent = scores
                .iter()
                .rev()
                .take(8)
                .map(|s| format!("+{}", s))
                .collect::<Vec<_>>()
                .join(" ");
            ui.set_param("main:score_list", "text", recent);
        });

        // Taps grow the glade; a full field gets reworked instead.
        {
            let announce = bus.clone();
            let state = Rc::clone(&state);
            holder += bus.connect("single_touch_ended", move |_| {
                {
                    let mut state = state.borrow_mut();
                    if state.mode != Mode::Playing {
                        return;
                    }
                    let delta = state.grow();
                    state.result.score += delta as u32;
                    state.scores.push(delta);
                }
                let scores = state.borrow().scores.clone();
                announce.signal("Game:Scores", &Arguments::new().with("scores", scores));
            });
        }

        // Drag orbits; pinch and wheel zoom.
        {
            let camera = Rc::clone(&camera);
            let state = Rc::clone(&state);
            holder += bus.connect("single_touch_moved", move |args| {
                if state.borrow().mode != Mode::Playing {
                    return;
                }
                let touch = args.touch("touch");
                camera
                    .borrow_mut()
                    .add_yaw((touch.pos.x - touch.prev_pos.x) * 0.005);
            });
        }
        {
            let camera = Rc::clone(&camera);
            holder += bus.connect("multi_touch_moved", move |args| {
                let touches = args.touches("touches");
                if touches.len() < 2 {
                    return;
                }
                let span_now = touches[0].pos.distance(touches[1].pos);
                let span_prev = touches[0].prev_pos.distance(touches[1].prev_pos);
                if span_prev > f32::EPSILON && span_now > f32::EPSILON {
                    camera.borrow_mut().pinch_distance(span_now / span_prev);
                }
            });
        }
        {
            let camera = Rc::clone(&camera);
            holder += bus.connect("wheel:scrolled", move |args| {
                let amount = args.float("amount") as f32;
                camera.borrow_mut().pinch_distance(1.0 + amount * 0.1);
            });
        }

        Self {
            bus: bus.clone(),
            holder,
            defer,
            canvas,
            camera,
            records,
            state,
            result_delay: game.result_delay,
        }
    }

    fn finish_round(&mut self) {
        let result = {
            let mut state = self.state.borrow_mut();
            state.mode = Mode::Finished;
            state.result
        };
        self.bus.signal("Game:Finish", &Arguments::new());

        let was_high = {
            let mut records = self.records.borrow_mut();
            let was_high = result.score > 0 && result.score > records.records().high_score;
            if let Err(e) = records.record_game(&result) {
                eprintln!("records: save failed: {}", e);
            }
            was_high
        };

        let ui = self.canvas.handle();
        ui.enable("main", false);
        ui.enable("result", true);
        ui.set_param("result:score", "text", format!("{} pts", result.score));
        ui.enable("result:high_score", was_high);

        // Glide back to the opening framing behind the result overlay.
        self.camera.borrow_mut().reset();

        let state = Rc::clone(&self.state);
        let announce = self.bus.clone();
        self.defer.add(self.result_delay, move || {
            state.borrow_mut().finished = true;
            announce.signal("GameMain:finished", &Arguments::new());
        });
    }

    fn draw_field(&self, window_size: Vec2) {
        let aspect = window_size.x / window_size.y.max(1.0);
        set_camera(&self.camera.borrow().camera3d(aspect));

        draw_grid(
            20,
            TILE_SPACING,
            Color::new(0.28, 0.38, 0.30, 1.0),
            Color::new(0.18, 0.26, 0.20, 1.0),
        );

        let state = self.state.borrow();
        for tile in &state.tiles {
            let pos = tile_pos(tile.cell) + vec3(0.0, 0.15, 0.0);
            let color = if tile.turned {
                Color::new(0.85, 0.70, 0.25, 1.0)
            } else {
                Color::new(0.30, 0.62, 0.32, 1.0)
            };
            draw_cube(pos, vec3(1.0, 0.3, 1.0), None, color);
        }

        set_default_camera();
    }
}

impl Task for GameMain {
    fn update(&mut self, _current_time: f64, delta_time: f64) -> bool {
        self.defer.update(delta_time);

        let mode = self.state.borrow().mode;
        if mode == Mode::Playing {
            let (crossed, remaining) = {
                let mut state = self.state.borrow_mut();
                state.remaining = (state.remaining - delta_time).max(0.0);
                let whole = state.remaining.ceil() as i64;
                let crossed = whole != state.shown_seconds;
                state.shown_seconds = whole;
                (crossed, state.remaining)
            };
            if crossed {
                self.bus
                    .signal("Game:UI", &Arguments::new().with("remaining_time", remaining));
            }

            {
                let (center, radius) = {
                    let state = self.state.borrow();
                    field_extent(&state.tiles)
                };
                self.camera.borrow_mut().fit_view(center, radius);
            }

            if remaining <= 0.0 {
                self.finish_round();
            }
        }

        // The camera keeps gliding behind overlays; only a pause holds it.
        if mode != Mode::Paused {
            self.camera.borrow_mut().update(delta_time);
        }

        !self.state.borrow().finished
    }

    fn draw(&mut self, target: &mut dyn DrawTarget, window_size: Vec2) {
        self.draw_field(window_size);
        self.canvas.draw(target, window_size);
    }
}

impl PlayState {
    /// One tap's worth of growth. Places while spiral cells remain, then
    /// alternates flipping and shuffling tiles already down. Returns the
    /// score gained.
    fn grow(&mut self) -> i64 {
        let index = self.tiles.len();
        if index < FIELD_CELLS {
            self.tiles.push(Tile {
                cell: spiral_cell(index),
                turned: false,
            });
            self.result.tiles += 1;
            return PLACE_SCORE;
        }

        let len = self.tiles.len();
        let cursor = self.rework_cursor;
        self.rework_cursor += 1;
        if cursor % 2 == 0 {
            let tile = &mut self.tiles[cursor % len];
            tile.turned = !tile.turned;
            self.result.turned += 1;
            TURN_SCORE
        } else {
            let i = cursor % len;
            let j = (cursor + 1) % len;
            let swapped = self.tiles[j].cell;
            self.tiles[j].cell = self.tiles[i].cell;
            self.tiles[i].cell = swapped;
            self.result.moved += 1;
            MOVE_SCORE
        }
    }
}

fn tile_pos(cell: (i32, i32)) -> Vec3 {
    vec3(cell.0 as f32 * TILE_SPACING, 0.0, cell.1 as f32 * TILE_SPACING)
}

/// Center and radius of the placed tiles, for camera framing.
fn field_extent(tiles: &[Tile]) -> (Vec3, f32) {
    if tiles.is_empty() {
        return (Vec3::ZERO, 3.0);
    }
    let mut center = Vec3::ZERO;
    for tile in tiles {
        center += tile_pos(tile.cell);
    }
    center /= tiles.len() as f32;

    let mut radius: f32 = 0.0;
    for tile in tiles {
        radius = radius.max(center.distance(tile_pos(tile.cell)));
    }
    (center, (radius + TILE_SPACING).max(3.0))
}

/// Square-spiral cell for a placement index: the origin first, then each
/// ring clockwise from its upper-left corner.
fn spiral_cell(index: usize) -> (i32, i32) {
    if index == 0 {
        return (0, 0);
    }
    let mut ring = 1usize;
    let mut first = 1usize;
    while index >= first + ring * 8 {
        first += ring * 8;
        ring += 1;
    }
    let side_len = ring * 2;
    let offset = index - first;
    let side = offset / side_len;
    let step = (offset % side_len) as i32;
    let r = ring as i32;
    match side {
        0 => (-r + step, -r),
        1 => (r, -r + step),
        2 => (r - step, r),
        _ => (-r, r - step),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::parse;
    use std::collections::HashSet;
    use tempfile::TempDir;

    const DOC: &str = include_str!("../../assets/ui/game_main.ron");

    fn game_config() -> GameConfig {
        GameConfig {
            limit_time: 5.0,
            start_delay: 1.0,
            result_delay: 1.0,
            warn_time: 10.0,
        }
    }

    fn camera_config() -> FieldCameraConfig {
        FieldCameraConfig {
            rotation: [-35.0, 0.0],
            distance: 18.0,
            target: [0.0, 0.0, 0.0],
            distance_range: [8.0, 40.0],
            ease_rate: [0.25, 60.0],
            fov: 35.0,
        }
    }

    struct Fixture {
        bus: EventBus,
        game: GameMain,
        records: Rc<RefCell<RecordStore>>,
        _dir: TempDir,
    }

    fn fixture(game_config: GameConfig) -> Fixture {
        let dir = TempDir::new().unwrap();
        let records = Rc::new(RefCell::new(
            RecordStore::open(dir.path().join("records.ron")).unwrap(),
        ));
        let bus = EventBus::new();
        let ui = parse(DOC).unwrap();
        let game = GameMain::new(
            &game_config,
            &camera_config(),
            &ui,
            &bus,
            Rc::clone(&records),
        );
        Fixture {
            bus,
            game,
            records,
            _dir: dir,
        }
    }

    fn spy(bus: &EventBus, topic: &str) -> (Rc<std::cell::Cell<u32>>, crate::event::Connection) {
        let count = Rc::new(std::cell::Cell::new(0));
        let inner = Rc::clone(&count);
        let connection = bus.connect(topic, move |_| inner.set(inner.get() + 1));
        (count, connection)
    }

    #[test]
    fn test_round_goes_live_after_start_delay() {
        let mut f = fixture(game_config());
        let (started, _keep) = spy(&f.bus, "Game:Start");

        assert!(f.game.canvas.is_enabled("begin"));
        assert!(!f.game.canvas.is_enabled("main"));

        f.game.update(0.0, 0.5);
        assert_eq!(started.get(), 0);

        f.game.update(0.0, 0.6);
        assert_eq!(started.get(), 1);
        assert!(!f.game.canvas.is_enabled("begin"));
        assert!(f.game.canvas.is_enabled("main"));
    }

    #[test]
    fn test_countdown_updates_hud_on_whole_seconds() {
        let mut f = fixture(game_config());
        // Goes live and immediately crosses below five seconds.
        f.game.update(0.0, 1.0);
        assert_eq!(
            f.game.canvas.get_param("main:time_remain", "text"),
            crate::args::Value::Text("0'04".into())
        );

        f.game.update(0.0, 1.25); // remaining 2.75 -> shows 3
        assert_eq!(
            f.game.canvas.get_param("main:time_remain", "text"),
            crate::args::Value::Text("0'03".into())
        );
    }

    #[test]
    fn test_countdown_turns_red_inside_warn_time() {
        let f = fixture(game_config());
        // The binding alone decides the color; drive it directly.
        f.bus
            .signal("Game:UI", &Arguments::new().with("remaining_time", 30.0));
        assert_eq!(
            f.game.canvas.get_param("main:time_remain", "color"),
            crate::args::Value::Color(WHITE)
        );

        f.bus
            .signal("Game:UI", &Arguments::new().with("remaining_time", 9.4));
        assert_eq!(
            f.game.canvas.get_param("main:time_remain", "color"),
            crate::args::Value::Color(WARN_COLOR)
        );
    }

    #[test]
    fn test_taps_place_tiles_and_update_scores() {
        let mut f = fixture(game_config());

        // Ignored while the ready overlay is still up.
        f.bus.signal("single_touch_ended", &Arguments::new());
        assert_eq!(f.game.state.borrow().result.tiles, 0);

        f.game.update(0.0, 1.0);
        f.bus.signal("single_touch_ended", &Arguments::new());
        f.bus.signal("single_touch_ended", &Arguments::new());

        let state = f.game.state.borrow();
        assert_eq!(state.result.tiles, 2);
        assert_eq!(state.scores, vec![PLACE_SCORE, PLACE_SCORE]);
        drop(state);

        assert_eq!(
            f.game.canvas.get_param("main:score", "text"),
            crate::args::Value::Text("20".into())
        );
    }

    #[test]
    fn test_pause_freezes_countdown_and_resume_releases_it() {
        let mut f = fixture(game_config());
        f.game.update(0.0, 1.0);

        f.bus.signal("menu:tapped", &Arguments::new());
        assert!(f.game.canvas.is_enabled("pause_menu"));
        assert!(!f.game.canvas.is_enabled("main"));

        let before = f.game.state.borrow().remaining;
        f.game.update(0.0, 2.0);
        assert_eq!(f.game.state.borrow().remaining, before);

        f.bus.signal("menu:tapped", &Arguments::new());
        assert!(!f.game.canvas.is_enabled("pause_menu"));
        assert!(f.game.canvas.is_enabled("main"));
        f.game.update(0.0, 0.5);
        assert!(f.game.state.borrow().remaining < before);
    }

    #[test]
    fn test_abort_from_pause_menu_ends_and_records() {
        let mut f = fixture(game_config());
        let (aborted, _keep) = spy(&f.bus, "GameMain:aborted");
        f.game.update(0.0, 1.0);

        // Not paused: abort does nothing.
        f.bus.signal("abort:tapped", &Arguments::new());
        assert_eq!(aborted.get(), 0);

        f.bus.signal("menu:tapped", &Arguments::new());
        f.bus.signal("abort:tapped", &Arguments::new());
        assert_eq!(aborted.get(), 1);
        assert!(!f.game.update(0.0, 0.016));
        assert_eq!(f.records.borrow().records().abort_times, 1);
    }

    #[test]
    fn test_expiry_records_round_and_ends_task() {
        let mut f = fixture(GameConfig {
            limit_time: 1.0,
            start_delay: 0.0,
            result_delay: 0.5,
            warn_time: 10.0,
        });
        let (finished_round, _k1) = spy(&f.bus, "Game:Finish");
        let (task_done, _k2) = spy(&f.bus, "GameMain:finished");

        f.game.update(0.0, 0.2); // start fires, countdown begins
        f.bus.signal("single_touch_ended", &Arguments::new());

        assert!(f.game.update(0.0, 1.0)); // expires
        assert_eq!(finished_round.get(), 1);
        assert!(f.game.canvas.is_enabled("result"));
        assert!(f.game.canvas.is_enabled("result:high_score"));
        assert_eq!(
            f.game.canvas.get_param("result:score", "text"),
            crate::args::Value::Text("10 pts".into())
        );

        let records = f.records.borrow().records().clone();
        assert_eq!(records.play_times, 1);
        assert_eq!(records.high_score, 10);

        assert!(f.game.update(0.0, 0.2));
        assert!(!f.game.update(0.0, 0.4));
        assert_eq!(task_done.get(), 1);
    }

    #[test]
    fn test_full_field_reworks_tiles() {
        let mut f = fixture(GameConfig {
            limit_time: 1000.0,
            start_delay: 0.0,
            result_delay: 0.5,
            warn_time: 10.0,
        });
        f.game.update(0.0, 0.1);

        for _ in 0..FIELD_CELLS + 4 {
            f.bus.signal("single_touch_ended", &Arguments::new());
        }

        let state = f.game.state.borrow();
        assert_eq!(state.tiles.len(), FIELD_CELLS);
        assert_eq!(state.result.tiles, FIELD_CELLS as u32);
        assert_eq!(state.result.turned, 2);
        assert_eq!(state.result.moved, 2);
    }

    #[test]
    fn test_spiral_cells_are_unique_and_ring_ordered() {
        let cells: Vec<_> = (0..FIELD_CELLS).map(spiral_cell).collect();
        let unique: HashSet<_> = cells.iter().copied().collect();
        assert_eq!(unique.len(), FIELD_CELLS);
        assert_eq!(cells[0], (0, 0));
        // 49 cells = full rings up to radius 3.
        assert!(cells.iter().all(|c| c.0.abs() <= 3 && c.1.abs() <= 3));
    }
}
