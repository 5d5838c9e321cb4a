//! Detail view of one trash can: an explicit state plus a reducer over the events that can
//! change it. Side effects (commands to the device) are returned to the caller, never run here.

use std::fmt::Display;
use std::time::Duration;

use remoove_api_caller::{
    errors::ApiError,
    json::{
        manual_control::{GantryPosition, ManualControlCommand},
        status::{FillLevels, TrashCanStatus, WasteCategory},
    },
};
use utils::time::Time;
use ws_handler::frames::OutboundFrame;

pub const LOADING_LABEL: &str = "Loading...";
pub const JUST_UPDATED_LABEL: &str = "Just Updated";
pub const INITIAL_FETCH_ERROR: &str = "Failed to fetch initial status";
pub const GANTRY_BUSY_NOTICE: &str = "Please wait for the gantry to stop moving.";

const JUST_UPDATED_WINDOW: Duration = Duration::from_secs(120);
const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;
const PROGRESS_BAR_WIDTH: u8 = 20;

#[derive(Debug)]
pub enum StatusEvent {
    RestFetched(Result<TrashCanStatus, ApiError>),
    SocketPushed(TrashCanStatus),
    TimerTicked,
    UserAction(UserAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    ForceSort,
    ToggleTrap,
    MoveGantry(GantryPosition),
    EmptyCategory(WasteCategory),
}

/// Fire-and-forget work requested by the view
#[derive(Debug, Clone, PartialEq)]
pub enum StatusEffect {
    Post(ManualControlCommand),
    Broadcast(OutboundFrame),
}

/// "Just Updated" for the first two minutes, then minutes, then hours.
/// The minute count starts at one when the two-minute window closes.
#[must_use]
pub fn relative_time_label(elapsed: Duration) -> String {
    if elapsed < JUST_UPDATED_WINDOW {
        return JUST_UPDATED_LABEL.to_string();
    }

    let secs = elapsed.as_secs();
    if secs < SECS_PER_HOUR {
        plural_ago(secs / SECS_PER_MINUTE - 1, "minute")
    } else {
        plural_ago(secs / SECS_PER_HOUR, "hour")
    }
}

fn plural_ago(count: u64, unit: &str) -> String {
    let suffix = if count > 1 { "s" } else { "" };
    format!("{count} {unit}{suffix} ago")
}

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct StatusViewState {
    trash_can_id: String,
    status: TrashCanStatus,
    last_updated: Option<Time>,
    last_updated_label: String,
    error: Option<String>,
    notice: Option<String>,
}

impl StatusViewState {
    pub fn new(trash_can_id: impl Into<String>) -> Self {
        Self {
            trash_can_id: trash_can_id.into(),
            status: TrashCanStatus {
                trash_can_id: None,
                fill_levels: FillLevels::zeroed(),
                sorting_status: String::new(),
                trap_status: String::new(),
            },
            last_updated: None,
            last_updated_label: LOADING_LABEL.to_string(),
            error: None,
            notice: None,
        }
    }

    pub fn apply(&mut self, event: StatusEvent, now: Time) -> Option<StatusEffect> {
        match event {
            StatusEvent::RestFetched(Ok(status)) => {
                self.replace_status(status, now);
                None
            }
            StatusEvent::RestFetched(Err(e)) => {
                tracing::error!(
                    "Initial status of trash can {} unavailable: {e}",
                    self.trash_can_id
                );
                self.error = Some(INITIAL_FETCH_ERROR.to_string());
                None
            }
            StatusEvent::SocketPushed(status) => {
                if self.status.has_same_readings(&status) {
                    tracing::trace!("Ignoring push without changes");
                } else {
                    self.replace_status(status, now);
                }
                None
            }
            StatusEvent::TimerTicked => {
                if let Some(last_updated) = self.last_updated {
                    self.last_updated_label = relative_time_label(now.saturating_sub(last_updated));
                }
                self.notice = None;
                None
            }
            StatusEvent::UserAction(action) => self.on_user_action(action, now),
        }
    }

    fn replace_status(&mut self, status: TrashCanStatus, now: Time) {
        self.status = status;
        self.last_updated = Some(now);
        self.last_updated_label = JUST_UPDATED_LABEL.to_string();
        self.error = None;
    }

    fn on_user_action(&mut self, action: UserAction, now: Time) -> Option<StatusEffect> {
        self.notice = None;

        let effect = match action {
            UserAction::ForceSort => StatusEffect::Post(ManualControlCommand::ForceSort),
            UserAction::ToggleTrap => {
                if !self.status.is_sorting_idle() {
                    self.notice = Some(GANTRY_BUSY_NOTICE.to_string());
                    return None;
                }
                StatusEffect::Post(ManualControlCommand::SetTrap {
                    open: self.status.is_trap_closed(),
                })
            }
            UserAction::MoveGantry(position) => {
                StatusEffect::Post(ManualControlCommand::MoveGantry(position))
            }
            UserAction::EmptyCategory(category) => {
                let mut emptied = self.status.clone();
                emptied.fill_levels.set(category, 0.);
                StatusEffect::Broadcast(OutboundFrame::status_update(
                    self.trash_can_id.clone(),
                    &emptied,
                    now.as_rfc3339_string(),
                ))
            }
        };

        Some(effect)
    }

    #[must_use]
    pub fn trash_can_id(&self) -> &str {
        &self.trash_can_id
    }

    #[must_use]
    pub fn status(&self) -> &TrashCanStatus {
        &self.status
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<Time> {
        self.last_updated
    }

    #[must_use]
    pub fn last_updated_label(&self) -> &str {
        &self.last_updated_label
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn trap_button_label(&self) -> &'static str {
        if self.status.is_trap_closed() {
            "Open Trap"
        } else {
            "Close Trap"
        }
    }
}

fn progress_bar(fill: f64) -> String {
    let step = 100. / f64::from(PROGRESS_BAR_WIDTH);
    (0..PROGRESS_BAR_WIDTH)
        .map(|i| if f64::from(i) * step < fill { '#' } else { '.' })
        .collect()
}

impl Display for StatusViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Trash Can: {}    Last Updated: {}",
            self.trash_can_id, self.last_updated_label
        )?;
        writeln!(f, "Sorting Mechanism: {}", self.status.sorting_status)?;
        writeln!(f, "Trap Mechanism: {}", self.status.trap_status)?;
        if let Some(error) = &self.error {
            writeln!(f, "Error: {error}")?;
        }

        writeln!(f, "Fill Level")?;
        for category in WasteCategory::ALL {
            let name = category.as_str();
            let fill = self.status.fill_levels.get(category);
            writeln!(f, "  {name:<11} [{}] {fill}% Full", progress_bar(fill))?;
        }

        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }
        Ok(())
    }
}
