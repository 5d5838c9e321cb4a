use std::sync::Arc;

use local_store::{make_local_store, traits::KeyValueStore};
use logging::init_logging;
use options::run_options::{
    RunCommand, RunOptions,
    alerts_options::AlertsCommand,
    cards_options::CardsCommand,
    chart_options::{ChartCategoryArg, ChartOptions, WasteCategoryArg},
    control_options::{ControlAction, ControlOptions},
    feedback_options::FeedbackOptions,
    sensor_data_options::SensorDataOptions,
    settings_options::{NotificationToggleArg, SettingsCommand},
};
use remoove_api_caller::{
    config::RemooveApiConfig,
    json::{
        feedback::FeedbackRequest,
        manual_control::{GantryPosition, InvalidBin},
        sensor::SensorDataQuery,
        status::WasteCategory,
    },
    make_remoove_client,
    traits::RemooveApi,
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::UnboundedSender,
};
use tracing::Instrument;
use utils::time::get_time;
use utils::time_getter::TimeGetter;
use ws_handler::{
    WsHandler,
    config::{ReconnectPolicy, WsHandlerConfig},
};

use crate::{
    config::RemooveConfig,
    views::{
        alerts::AlertsView,
        cards::CardList,
        chart::{ChartSelection, ChartView},
        feedback::submit_feedback,
        roster::RosterView,
        sensor_log::SensorLogView,
        settings::{NotificationSettings, NotificationToggle},
        status::{StatusEffect, StatusEvent, StatusViewState, UserAction},
    },
    watch::{COMMANDS_HELP, WatchSettings, WatchSystem, parse_command},
};

impl From<&RemooveConfig> for RemooveApiConfig {
    fn from(config: &RemooveConfig) -> Self {
        Self {
            control_api_base_url: config.control_api_address().to_string(),
            data_api_base_url: config.data_api_address().to_string(),
            api_proxy: config.api_proxy().map(str::to_string),
        }
    }
}

impl From<&RemooveConfig> for WsHandlerConfig {
    fn from(config: &RemooveConfig) -> Self {
        WsHandlerConfig {
            url: config.websocket_url().to_string(),
            subscribe_on_connect: config.websocket_subscribe_on_connect(),
            reconnect: ReconnectPolicy {
                enabled: config.websocket_reconnect(),
                base_delay: config.websocket_reconnect_base_delay(),
                max_delay: config.websocket_reconnect_max_delay(),
                max_attempts: config.websocket_max_reconnect_attempts(),
            },
        }
    }
}

fn category_from_arg(arg: WasteCategoryArg) -> WasteCategory {
    match arg {
        WasteCategoryArg::Containers => WasteCategory::Containers,
        WasteCategoryArg::Organics => WasteCategory::Organics,
        WasteCategoryArg::Landfill => WasteCategory::Landfill,
        WasteCategoryArg::Paper => WasteCategory::Paper,
    }
}

fn toggle_from_arg(arg: NotificationToggleArg) -> NotificationToggle {
    match arg {
        NotificationToggleArg::Alerts => NotificationToggle::Alerts,
        NotificationToggleArg::SortingErrors => NotificationToggle::SortingErrors,
        NotificationToggleArg::FullBin => NotificationToggle::FullBin,
    }
}

impl From<ChartCategoryArg> for ChartSelection {
    fn from(arg: ChartCategoryArg) -> Self {
        match arg {
            ChartCategoryArg::Total => ChartSelection::Total,
            ChartCategoryArg::Containers => ChartSelection::Category(WasteCategory::Containers),
            ChartCategoryArg::Organics => ChartSelection::Category(WasteCategory::Organics),
            ChartCategoryArg::Landfill => ChartSelection::Category(WasteCategory::Landfill),
            ChartCategoryArg::Paper => ChartSelection::Category(WasteCategory::Paper),
        }
    }
}

impl TryFrom<&ControlAction> for UserAction {
    type Error = InvalidBin;

    fn try_from(action: &ControlAction) -> Result<Self, Self::Error> {
        let action = match action {
            ControlAction::ForceSort => UserAction::ForceSort,
            ControlAction::ToggleTrap => UserAction::ToggleTrap,
            ControlAction::MoveToBin { bin } => UserAction::MoveGantry(GantryPosition::bin(*bin)?),
            ControlAction::Home => UserAction::MoveGantry(GantryPosition::Home),
            ControlAction::Empty { category } => {
                UserAction::EmptyCategory(category_from_arg(*category))
            }
        };
        Ok(action)
    }
}

fn chart_range<'a>(options: &'a ChartOptions, config: &'a RemooveConfig) -> &'a str {
    options
        .range
        .as_deref()
        .unwrap_or_else(|| config.default_chart_range())
}

fn make_api(config: &RemooveConfig) -> anyhow::Result<Arc<dyn RemooveApi>> {
    Ok(Arc::from(make_remoove_client(RemooveApiConfig::from(
        config,
    ))?))
}

fn make_store(config: &RemooveConfig) -> Box<dyn KeyValueStore> {
    make_local_store(config.storage_dir())
}

pub async fn run(options: RunOptions) -> anyhow::Result<()> {
    init_logging();

    let config = RemooveConfig::from_file_or_default(&options.config_file_path)?;

    match options.command {
        RunCommand::Watch(chart_options) => {
            let span = tracing::info_span!("watch", trash_can_id = %chart_options.trash_can_id);
            watch(&config, &chart_options).instrument(span).await
        }
        RunCommand::Roster => roster(&config).await,
        RunCommand::Alerts { command } => alerts(&config, &command).await,
        RunCommand::Control(control_options) => control(&config, &control_options).await,
        RunCommand::Chart(chart_options) => chart(&config, &chart_options).await,
        RunCommand::SensorData(sensor_options) => sensor_data(&config, sensor_options).await,
        RunCommand::Feedback(feedback_options) => feedback(&config, feedback_options).await,
        RunCommand::Cards { command } => cards(&config, command).await,
        RunCommand::Settings { command } => settings(&config, command).await,
    }
}

async fn test_api_connection(api: &dyn RemooveApi) {
    match api.test_call().await {
        Ok(()) => tracing::info!("Initial test connection to the ReMoove API succeeded."),
        Err(e) => tracing::error!(
            "Error: failed to make test connection to the ReMoove API. This could mean that the API is temporarily down, or that the address you used is wrong. Error: {e}"
        ),
    }
}

fn spawn_command_reader(action_sender: UnboundedSender<UserAction>) {
    logging::spawn_in_current_span(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match parse_command(&line) {
                    Ok(action) => {
                        if action_sender.send(action).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("{e}"),
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Reading commands from stdin failed: {e}");
                    break;
                }
            }
        }
    });
}

async fn watch(config: &RemooveConfig, options: &ChartOptions) -> anyhow::Result<()> {
    let api = make_api(config)?;
    test_api_connection(api.as_ref()).await;

    let (stop_sender, stop_receiver) = tokio::sync::mpsc::unbounded_channel();

    ctrlc::set_handler(move || {
        tracing::info!("Sending a terminate (Ctrl+C) signal");
        if stop_sender.send(()).is_err() {
            tracing::error!("Could not send the stop signal; the view has already ended");
        }
    })?;

    let (push_sender, push_receiver) = tokio::sync::mpsc::unbounded_channel();
    let mut ws_handler = WsHandler::new(
        WsHandlerConfig::from(config),
        options.trash_can_id.clone(),
        push_sender,
    )?;

    let (action_sender, action_receiver) = tokio::sync::mpsc::unbounded_channel();
    spawn_command_reader(action_sender);
    tracing::info!("{COMMANDS_HELP}");

    let settings = WatchSettings {
        refresh_interval: config.status_refresh_interval(),
        chart_poll_interval: config.chart_poll_interval(),
        chart_range: chart_range(options, config).to_string(),
        chart_selection: options.category.into(),
    };

    let mut system = WatchSystem::new(
        api,
        options.trash_can_id.clone(),
        settings,
        TimeGetter::default(),
        |screen| println!("{screen}"),
        Some(stop_receiver),
    )
    .with_outbound_sender(ws_handler.outbound_sender());

    system.run(push_receiver, Some(action_receiver)).await;

    ws_handler.stop();
    ws_handler.wait().await;

    Ok(())
}

async fn roster(config: &RemooveConfig) -> anyhow::Result<()> {
    let api = make_api(config)?;
    let store = make_store(config);

    let mut view = RosterView::load(api.as_ref(), store.as_ref()).await?;
    print!("{view}");

    view.refresh_statuses(api.as_ref(), get_time()).await;
    println!();
    print!("{view}");

    Ok(())
}

async fn alerts(config: &RemooveConfig, command: &AlertsCommand) -> anyhow::Result<()> {
    let api = make_api(config)?;
    let settings = NotificationSettings::load(make_store(config).as_ref()).await;
    let mut view = AlertsView::fetch(api.as_ref()).await?;

    match command {
        AlertsCommand::List => {}
        AlertsCommand::Dismiss { alert_id } => {
            let dismissed = view.dismiss(api.as_ref(), alert_id).await?;
            tracing::info!("Dismissed alert {}", dismissed.id);
        }
        AlertsCommand::Clear => view.clear(api.as_ref()).await?,
    }

    print!("{}", view.visible(&settings));
    Ok(())
}

async fn settings(config: &RemooveConfig, command: SettingsCommand) -> anyhow::Result<()> {
    let store = make_store(config);
    let mut settings = NotificationSettings::load(store.as_ref()).await;

    if let SettingsCommand::Set { toggle, enabled } = command {
        let toggle = toggle_from_arg(toggle);
        settings.update(store.as_ref(), toggle, enabled).await;
        tracing::info!("{toggle} set to {enabled}");
    }

    print!("{settings}");
    Ok(())
}

async fn control(config: &RemooveConfig, options: &ControlOptions) -> anyhow::Result<()> {
    let api = make_api(config)?;
    let action = UserAction::try_from(&options.action)?;

    let mut state = StatusViewState::new(options.trash_can_id.clone());
    let fetched = api.fetch_status(&options.trash_can_id).await;
    state.apply(StatusEvent::RestFetched(fetched), get_time());
    if let Some(error) = state.error() {
        anyhow::bail!("{error}");
    }

    match state.apply(StatusEvent::UserAction(action), get_time()) {
        Some(StatusEffect::Post(command)) => {
            api.send_manual_control(&options.trash_can_id, &command)
                .await?;
            println!("Sent `{command}` to trash can {}", options.trash_can_id);
        }
        Some(StatusEffect::Broadcast(frame)) => {
            ws_handler::send_once(config.websocket_url(), &frame).await?;
            println!("Sent status update for trash can {}", options.trash_can_id);
        }
        None => {
            if let Some(notice) = state.notice() {
                println!("{notice}");
            }
        }
    }

    Ok(())
}

async fn chart(config: &RemooveConfig, options: &ChartOptions) -> anyhow::Result<()> {
    let api = make_api(config)?;

    let mut view = ChartView::new(chart_range(options, config), options.category.into());
    view.apply_fetch(api.fetch_chart_data(&options.trash_can_id).await);
    print!("{view}");

    Ok(())
}

async fn sensor_data(config: &RemooveConfig, options: SensorDataOptions) -> anyhow::Result<()> {
    let api = make_api(config)?;

    let query = SensorDataQuery {
        device_id: options.device_id,
        time_stamp: options.timestamp,
    };
    print!("{}", SensorLogView::fetch(api.as_ref(), query).await);

    Ok(())
}

async fn feedback(config: &RemooveConfig, options: FeedbackOptions) -> anyhow::Result<()> {
    let api = make_api(config)?;

    let request = FeedbackRequest {
        user_id: options.user_id,
        device_id: options.device_id,
        suggestion: options.suggestion,
    };
    println!("{}", submit_feedback(api.as_ref(), &request).await);

    Ok(())
}

async fn cards(config: &RemooveConfig, command: CardsCommand) -> anyhow::Result<()> {
    let store = make_store(config);
    let mut cards = CardList::load(store.as_ref()).await;

    match command {
        CardsCommand::List => {}
        CardsCommand::Add { title, description } => {
            let card = cards
                .add(store.as_ref(), title, description, get_time())
                .await;
            tracing::info!("Added card {}", card.id);
        }
        CardsCommand::Delete { card_id } => {
            if !cards.delete(store.as_ref(), card_id).await {
                anyhow::bail!("No card with id {card_id}");
            }
        }
    }

    print!("{cards}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const CONFIG: &str = r"
control_api_address: http://control.example.com/
data_api_address: http://data.example.com
websocket_url: wss://ws.example.com
websocket_reconnect: false
websocket_max_reconnect_attempts: 3
default_chart_range: month
";

    #[test]
    fn api_config_from_config() {
        let config = RemooveConfig::from_yaml(CONFIG).unwrap();
        let api_config = RemooveApiConfig::from(&config);
        assert_eq!(api_config.control_api_base_url, "http://control.example.com/");
        assert_eq!(api_config.data_api_base_url, "http://data.example.com");
        assert_eq!(api_config.api_proxy, None);
    }

    #[test]
    fn ws_config_from_config() {
        let config = RemooveConfig::from_yaml(CONFIG).unwrap();
        let ws_config = WsHandlerConfig::from(&config);
        assert_eq!(ws_config.url, "wss://ws.example.com");
        assert!(ws_config.subscribe_on_connect);
        assert!(!ws_config.reconnect.enabled);
        assert_eq!(ws_config.reconnect.max_attempts, 3);
        assert_eq!(
            ws_config.reconnect.base_delay,
            std::time::Duration::from_secs(1)
        );
    }

    #[rstest]
    #[case(ControlAction::ForceSort, UserAction::ForceSort)]
    #[case(ControlAction::ToggleTrap, UserAction::ToggleTrap)]
    #[case(ControlAction::MoveToBin { bin: 2 }, UserAction::MoveGantry(GantryPosition::Bin(2)))]
    #[case(ControlAction::Home, UserAction::MoveGantry(GantryPosition::Home))]
    #[case(
        ControlAction::Empty { category: WasteCategoryArg::Landfill },
        UserAction::EmptyCategory(WasteCategory::Landfill)
    )]
    fn control_actions(#[case] action: ControlAction, #[case] expected: UserAction) {
        assert_eq!(UserAction::try_from(&action), Ok(expected));
    }

    #[rstest]
    #[case(WasteCategoryArg::Containers, WasteCategory::Containers)]
    #[case(WasteCategoryArg::Organics, WasteCategory::Organics)]
    #[case(WasteCategoryArg::Landfill, WasteCategory::Landfill)]
    #[case(WasteCategoryArg::Paper, WasteCategory::Paper)]
    fn categories(#[case] arg: WasteCategoryArg, #[case] expected: WasteCategory) {
        assert_eq!(category_from_arg(arg), expected);
    }

    #[rstest]
    #[case(NotificationToggleArg::Alerts, NotificationToggle::Alerts)]
    #[case(NotificationToggleArg::SortingErrors, NotificationToggle::SortingErrors)]
    #[case(NotificationToggleArg::FullBin, NotificationToggle::FullBin)]
    fn notification_toggles(
        #[case] arg: NotificationToggleArg,
        #[case] expected: NotificationToggle,
    ) {
        assert_eq!(toggle_from_arg(arg), expected);
    }

    #[test]
    fn out_of_range_bin() {
        assert_eq!(
            UserAction::try_from(&ControlAction::MoveToBin { bin: 9 }),
            Err(InvalidBin(9))
        );
    }

    #[rstest]
    #[case(ChartCategoryArg::Total, ChartSelection::Total)]
    #[case(ChartCategoryArg::Paper, ChartSelection::Category(WasteCategory::Paper))]
    fn chart_selection(#[case] arg: ChartCategoryArg, #[case] expected: ChartSelection) {
        assert_eq!(ChartSelection::from(arg), expected);
    }

    #[rstest]
    #[case(None, "month")]
    #[case(Some("day"), "day")]
    fn range_falls_back_to_config(#[case] range: Option<&str>, #[case] expected: &str) {
        let config = RemooveConfig::from_yaml(CONFIG).unwrap();
        let options = ChartOptions {
            trash_can_id: "1".to_string(),
            range: range.map(str::to_string),
            category: ChartCategoryArg::Total,
        };
        assert_eq!(chart_range(&options, &config), expected);
    }
}
