//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose health checks and logging setup to Dart via FRB.
//! - Host one list screen session: open, feed touches, draw, type, close.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - At most one screen session is open per process; opening a new one
//!   closes the previous one.
//! - Frames and list changes cross the boundary as JSON strings.

use log::{info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use taskdeck_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_db,
    ping as ping_inner, CoreConfig, ListScreen, LoggingConfig, MotionEvent, Pointer,
    RowAdapter, RowId, RowItem, SnapshotView, SqliteRowStore, Task, TaskList, TouchAction,
    TouchOutcome, Viewport,
};

const SCREEN_VIEW_ID: u64 = 1;

static SESSION: Mutex<Option<ScreenSession>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let config = LoggingConfig {
        level,
        log_dir: Some(log_dir),
        ..LoggingConfig::default()
    };
    match init_logging_inner(&config) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One pointer of a touch event, in view pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub x: f32,
    pub y: f32,
}

/// Response envelope for every screen session call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenResponse {
    /// Whether the call succeeded.
    pub ok: bool,
    /// Whether the screen consumed the input.
    pub consumed: bool,
    /// Gesture state after the call (`idle|swipe|drag|pull`).
    pub action_state: String,
    /// Row with an open edit field, if any.
    pub editing: Option<u32>,
    /// JSON array of list changes committed by this call.
    pub changes_json: String,
    /// Set once an over-pull asked the host to leave the screen.
    pub exit_requested: bool,
    /// Task list opened by a badge tap during this call.
    pub opened_list_id: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl ScreenResponse {
    fn from_outcome(outcome: TouchOutcome, opened_list_id: Option<String>) -> Self {
        let changes_json = match serde_json::to_string(&outcome.changes) {
            Ok(json) => json,
            Err(err) => return Self::failure(format!("change encoding failed: {err}")),
        };
        Self {
            ok: true,
            consumed: outcome.consumed,
            action_state: outcome.action_state.as_str().to_string(),
            editing: outcome.editing.and_then(|position| u32::try_from(position).ok()),
            changes_json,
            exit_requested: outcome.exit_requested,
            opened_list_id,
            message: String::new(),
        }
    }

    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            consumed: false,
            action_state: "idle".to_string(),
            editing: None,
            changes_json: "[]".to_string(),
            exit_requested: false,
            opened_list_id: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            ..Self::success(message)
        }
    }
}

/// Draw-pass response carrying the serialized view frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameResponse {
    pub ok: bool,
    /// JSON `ViewFrame`; empty on failure.
    pub frame_json: String,
    pub message: String,
}

/// One committed row of the open screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Active task count, for task-list rows.
    pub badge: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowsResponse {
    pub ok: bool,
    pub rows: Vec<RowEntry>,
    pub message: String,
}

/// Opens a list screen over the database at `db_path`.
///
/// Input semantics:
/// - `list_id`: `None` opens the task lists; `Some(id)` opens that list's
///   tasks.
/// - `config_json`: `CoreConfig` JSON; blank uses defaults.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Replaces any open session.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_open(
    db_path: String,
    list_id: Option<String>,
    config_json: String,
    width: f32,
    height: f32,
    row_height: f32,
    badge_width: f32,
) -> ScreenResponse {
    let viewport = Viewport {
        width,
        height,
        row_height,
        badge_width,
    };
    match ScreenSession::open(db_path.trim(), list_id.as_deref(), &config_json, viewport) {
        Ok(session) => {
            let rows = session.row_count();
            if let Some(previous) = lock_session().replace(session) {
                previous.close();
            }
            info!("event=screen_open module=ffi status=ok rows={rows}");
            ScreenResponse::success(format!("Screen opened with {rows} row(s)."))
        }
        Err(err) => {
            warn!("event=screen_open module=ffi status=error");
            ScreenResponse::failure(format!("screen_open failed: {err}"))
        }
    }
}

/// Feeds one touch event to the open screen.
///
/// Input semantics:
/// - `action`: `down|move|up|cancel|pointer_down|pointer_up`.
/// - `pointers`: every pointer currently down.
///
/// # FFI contract
/// - Sync call; may commit one DB transaction.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_touch(
    action: String,
    action_pointer: i32,
    pointers: Vec<TouchPoint>,
    time_ms: u64,
) -> ScreenResponse {
    let Some(action) = parse_action(action.as_str()) else {
        return ScreenResponse::failure(format!("screen_touch failed: unknown action `{action}`"));
    };
    let event = MotionEvent {
        action,
        action_pointer,
        pointers: pointers
            .into_iter()
            .map(|point| Pointer {
                id: point.id,
                x: point.x,
                y: point.y,
            })
            .collect(),
        time_ms,
    };
    with_session("screen_touch", |session| session.handle_touch(&event))
}

/// Advances time for long-press detection while a pointer is held still.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_tick(now_ms: u64) -> ScreenResponse {
    with_session("screen_tick", |session| session.tick(now_ms))
}

/// Reports that an ancestor took over the touch stream.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_disallow_intercept() -> ScreenResponse {
    with_session("screen_disallow_intercept", ScreenSession::disallow_intercept)
}

/// Runs one draw pass and returns the frame to render.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_frame() -> FrameResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return FrameResponse {
            ok: false,
            frame_json: String::new(),
            message: "screen_frame failed: no open screen".to_string(),
        };
    };
    let Some(frame) = session.draw() else {
        return FrameResponse {
            ok: false,
            frame_json: String::new(),
            message: "screen_frame failed: view detached".to_string(),
        };
    };
    match serde_json::to_string(&frame) {
        Ok(frame_json) => FrameResponse {
            ok: true,
            frame_json,
            message: String::new(),
        },
        Err(err) => FrameResponse {
            ok: false,
            frame_json: String::new(),
            message: format!("screen_frame failed: {err}"),
        },
    }
}

/// Replaces the contents of the open edit field.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_type_text(text: String) -> ScreenResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return ScreenResponse::failure("screen_type_text failed: no open screen");
    };
    if session.type_text(&text) {
        ScreenResponse::success("Edit field updated.")
    } else {
        ScreenResponse::failure("screen_type_text failed: no row is being edited")
    }
}

/// Lists the committed rows of the open screen.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_rows() -> RowsResponse {
    let guard = lock_session();
    match guard.as_ref() {
        Some(session) => RowsResponse {
            ok: true,
            rows: session.rows(),
            message: String::new(),
        },
        None => RowsResponse {
            ok: false,
            rows: Vec::new(),
            message: "screen_rows failed: no open screen".to_string(),
        },
    }
}

/// Closes the open screen; closing with no open screen succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn screen_close() -> ScreenResponse {
    match lock_session().take() {
        Some(session) => {
            session.close();
            info!("event=screen_close module=ffi status=ok");
            ScreenResponse::success("Screen closed.")
        }
        None => ScreenResponse::success("No open screen."),
    }
}

type TaskScreen = ListScreen<Task, SqliteRowStore<Task>>;
type TaskListScreen = ListScreen<TaskList, SqliteRowStore<TaskList>>;

enum ScreenKind {
    Tasks(TaskScreen),
    Lists(TaskListScreen),
}

struct ScreenSession {
    screen: ScreenKind,
    opened: Arc<Mutex<Option<RowId>>>,
}

impl ScreenSession {
    fn open(
        db_path: &str,
        list_id: Option<&str>,
        config_json: &str,
        viewport: Viewport,
    ) -> Result<Self, String> {
        if db_path.is_empty() {
            return Err("db_path cannot be empty".to_string());
        }
        let config = CoreConfig::from_json(config_json).map_err(|err| err.to_string())?;
        let conn = open_db(db_path).map_err(|err| err.to_string())?;
        let view = SnapshotView::new(SCREEN_VIEW_ID, viewport);
        let opened = Arc::new(Mutex::new(None));

        let screen = match list_id {
            Some(raw) => {
                let parent = RowId::parse_str(raw.trim())
                    .map_err(|err| format!("invalid list id `{raw}`: {err}"))?;
                let store = SqliteRowStore::open(conn, Some(parent)).map_err(|err| err.to_string())?;
                ScreenKind::Tasks(ListScreen::new(config.gesture, RowAdapter::new(store), view))
            }
            None => {
                let store = SqliteRowStore::open(conn, None).map_err(|err| err.to_string())?;
                let sink = Arc::clone(&opened);
                let adapter = RowAdapter::new(store).with_click_handler(
                    move |_, list: &TaskList| {
                        *sink.lock().unwrap_or_else(PoisonError::into_inner) = Some(list.uuid);
                        true
                    },
                );
                ScreenKind::Lists(ListScreen::new(config.gesture, adapter, view))
            }
        };
        Ok(Self { screen, opened })
    }

    fn row_count(&self) -> usize {
        match &self.screen {
            ScreenKind::Tasks(screen) => screen.adapter().rows().len(),
            ScreenKind::Lists(screen) => screen.adapter().rows().len(),
        }
    }

    fn rows(&self) -> Vec<RowEntry> {
        match &self.screen {
            ScreenKind::Tasks(screen) => screen.adapter().rows().iter().map(row_entry).collect(),
            ScreenKind::Lists(screen) => screen.adapter().rows().iter().map(row_entry).collect(),
        }
    }

    fn handle_touch(&mut self, event: &MotionEvent) -> TouchOutcome {
        match &mut self.screen {
            ScreenKind::Tasks(screen) => screen.handle_touch(event),
            ScreenKind::Lists(screen) => screen.handle_touch(event),
        }
    }

    fn tick(&mut self, now_ms: u64) -> TouchOutcome {
        match &mut self.screen {
            ScreenKind::Tasks(screen) => screen.tick(now_ms),
            ScreenKind::Lists(screen) => screen.tick(now_ms),
        }
    }

    fn disallow_intercept(&mut self) -> TouchOutcome {
        match &mut self.screen {
            ScreenKind::Tasks(screen) => screen.disallow_intercept(),
            ScreenKind::Lists(screen) => screen.disallow_intercept(),
        }
    }

    fn draw(&mut self) -> Option<taskdeck_core::ViewFrame> {
        match &mut self.screen {
            ScreenKind::Tasks(screen) => screen.draw(),
            ScreenKind::Lists(screen) => screen.draw(),
        }
    }

    fn type_text(&mut self, text: &str) -> bool {
        match &mut self.screen {
            ScreenKind::Tasks(screen) => screen.type_text(text),
            ScreenKind::Lists(screen) => screen.type_text(text),
        }
    }

    fn take_opened(&self) -> Option<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .map(|id| id.to_string())
    }

    fn close(self) {
        match self.screen {
            ScreenKind::Tasks(screen) => drop(screen.close()),
            ScreenKind::Lists(screen) => drop(screen.close()),
        }
    }
}

fn lock_session() -> MutexGuard<'static, Option<ScreenSession>> {
    SESSION.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_session(
    operation: &'static str,
    f: impl FnOnce(&mut ScreenSession) -> TouchOutcome,
) -> ScreenResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return ScreenResponse::failure(format!("{operation} failed: no open screen"));
    };
    let outcome = f(session);
    ScreenResponse::from_outcome(outcome, session.take_opened())
}

fn row_entry<T: RowItem>(row: &T) -> RowEntry {
    RowEntry {
        id: row.id().to_string(),
        text: row.text().to_string(),
        completed: row.is_completed(),
        badge: row.badge_count(),
    }
}

fn parse_action(raw: &str) -> Option<TouchAction> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "down" => Some(TouchAction::Down),
        "move" => Some(TouchAction::Move),
        "up" => Some(TouchAction::Up),
        "cancel" => Some(TouchAction::Cancel),
        "pointer_down" => Some(TouchAction::PointerDown),
        "pointer_up" => Some(TouchAction::PointerUp),
        _ => None,
    }
}
