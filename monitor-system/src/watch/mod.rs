//! Event loop of the live detail view: REST snapshot, WebSocket pushes, the relative-time
//! timer, chart polling and user commands, all applied to one state owned by the loop.

mod commands;

pub use commands::{COMMANDS_HELP, CommandParseError, parse_command};

use std::{sync::Arc, time::Duration};

use futures::FutureExt;
use remoove_api_caller::{json::status::TrashCanStatus, traits::RemooveApi};
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    time::{Instant, MissedTickBehavior, interval_at},
};
use utils::{struct_name, time_getter::TimeGetter};
use ws_handler::frames::OutboundFrame;

use crate::views::{
    chart::{ChartSelection, ChartView},
    status::{StatusEffect, StatusEvent, StatusViewState, UserAction},
};

const STRUCT_NAME: &str = struct_name!(WatchSystem);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSettings {
    pub refresh_interval: Duration,
    pub chart_poll_interval: Duration,
    pub chart_range: String,
    pub chart_selection: ChartSelection,
}

pub struct WatchSystem<R> {
    api: Arc<dyn RemooveApi>,
    state: StatusViewState,
    chart: ChartView,
    settings: WatchSettings,
    time_getter: TimeGetter,
    render: R,

    outbound_sender: Option<UnboundedSender<OutboundFrame>>,
    stop_receiver: Option<UnboundedReceiver<()>>,
}

impl<R> WatchSystem<R>
where
    R: FnMut(String) + Send,
{
    pub fn new(
        api: Arc<dyn RemooveApi>,
        trash_can_id: impl Into<String>,
        settings: WatchSettings,
        time_getter: TimeGetter,
        render: R,
        stop_receiver: Option<UnboundedReceiver<()>>,
    ) -> Self {
        let chart = ChartView::new(settings.chart_range.clone(), settings.chart_selection);
        Self {
            api,
            state: StatusViewState::new(trash_can_id),
            chart,
            settings,
            time_getter,
            render,
            outbound_sender: None,
            stop_receiver,
        }
    }

    /// Where frames produced by user actions go; without one they are dropped
    #[must_use]
    pub fn with_outbound_sender(mut self, sender: UnboundedSender<OutboundFrame>) -> Self {
        self.outbound_sender = Some(sender);
        self
    }

    pub async fn run(
        &mut self,
        mut push_receiver: UnboundedReceiver<TrashCanStatus>,
        mut action_receiver: Option<UnboundedReceiver<UserAction>>,
    ) {
        let start = Instant::now();
        let mut refresh_timer = interval_at(
            start + self.settings.refresh_interval,
            self.settings.refresh_interval,
        );
        refresh_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut chart_timer = interval_at(
            start + self.settings.chart_poll_interval,
            self.settings.chart_poll_interval,
        );
        chart_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let initial = self.api.fetch_status(self.state.trash_can_id()).await;
        self.apply(StatusEvent::RestFetched(initial));
        self.poll_chart().await;
        self.render_screen();

        let mut pushes_open = true;

        loop {
            let stop_receiver = match self.stop_receiver.as_mut() {
                Some(receiver) => receiver.recv().boxed(),
                None => futures::future::pending().boxed(),
            };
            let next_action = match action_receiver.as_mut() {
                Some(receiver) => receiver.recv().boxed(),
                None => futures::future::pending().boxed(),
            };

            tokio::select! {
                push = push_receiver.recv(), if pushes_open => {
                    match push {
                        Some(status) => self.apply(StatusEvent::SocketPushed(status)),
                        None => {
                            tracing::warn!("{STRUCT_NAME}: live updates ended; showing the last known status");
                            pushes_open = false;
                        }
                    }
                }

                _ = refresh_timer.tick() => {
                    self.apply(StatusEvent::TimerTicked);
                }

                _ = chart_timer.tick() => {
                    self.poll_chart().await;
                }

                action = next_action => {
                    match action {
                        Some(action) => self.apply(StatusEvent::UserAction(action)),
                        None => {
                            tracing::debug!("{STRUCT_NAME}: no more user commands");
                            action_receiver = None;
                        }
                    }
                }

                Some(()) = stop_receiver => {
                    tracing::info!("Received stop signal to stop {STRUCT_NAME}.");
                    break;
                }
            }

            self.render_screen();
        }

        tracing::info!("Reached the end of {STRUCT_NAME} event loop.");
    }

    fn apply(&mut self, event: StatusEvent) {
        let now = self.time_getter.get_time();
        if let Some(effect) = self.state.apply(event, now) {
            self.execute(effect);
        }
    }

    fn execute(&self, effect: StatusEffect) {
        match effect {
            StatusEffect::Post(command) => {
                let api = Arc::clone(&self.api);
                let trash_can_id = self.state.trash_can_id().to_string();
                tracing::info!("{STRUCT_NAME}: sending `{command}` to trash can {trash_can_id}");
                logging::spawn_in_current_span(async move {
                    if let Err(e) = api.send_manual_control(&trash_can_id, &command).await {
                        tracing::error!("Command `{command}` for trash can {trash_can_id}: {e}");
                    }
                });
            }
            StatusEffect::Broadcast(frame) => match &self.outbound_sender {
                Some(sender) => {
                    if sender.send(frame).is_err() {
                        tracing::error!("{STRUCT_NAME}: WebSocket task has ended; frame dropped");
                    }
                }
                None => tracing::warn!("{STRUCT_NAME}: no WebSocket to send the frame to"),
            },
        }
    }

    async fn poll_chart(&mut self) {
        let fetched = self.api.fetch_chart_data(self.state.trash_can_id()).await;
        self.chart.apply_fetch(fetched);
    }

    fn render_screen(&mut self) {
        let screen = format!("{}\n{}", self.state, self.chart);
        (self.render)(screen);
    }

    #[must_use]
    pub fn state(&self) -> &StatusViewState {
        &self.state
    }

    #[must_use]
    pub fn chart(&self) -> &ChartView {
        &self.chart
    }
}
