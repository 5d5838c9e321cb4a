use super::*;
use local_store::{errors::StoreError, make_inmemory_store};
use mocks::{key_value_store::make_store_mock, remoove_api::make_remoove_client_mock};
use remoove_api_caller::errors::{ApiFailure, ApiOperation};
use rstest::rstest;
use test_utils::asserts::{assert_str_contains, assert_str_ends_with, assert_str_starts_with};
use test_utils::random::{Rng, Seed, gen_fill_level, make_seedable_rng, random_seed};

const NOW: Time = Time::from_secs_since_epoch(1_700_000_000);

fn roster_entry(id: &str) -> RosterEntry {
    RosterEntry {
        id: id.to_string(),
        location: Some(format!("Building {id}")),
        image: None,
    }
}

fn roster_error() -> ApiError {
    ApiError::new(
        ApiOperation::FetchRoster,
        ApiFailure::HttpStatus {
            status: 503,
            body: "unavailable".to_string(),
        },
    )
}

fn status_with(levels: [f64; 4]) -> TrashCanStatus {
    TrashCanStatus {
        trash_can_id: None,
        fill_levels: WasteCategory::ALL.into_iter().zip(levels).collect(),
        sorting_status: "Idle".to_string(),
        trap_status: "Closed".to_string(),
    }
}

#[rstest]
#[case([0., 0., 0., 0.], StatusLabel::Working)]
#[case([79., 10., 0., 0.], StatusLabel::Working)]
#[case([80., 10., 0., 0.], StatusLabel::AlmostFull)]
#[case([0., 0., 99.5, 0.], StatusLabel::AlmostFull)]
#[case([0., 0., 0., 100.], StatusLabel::Full)]
#[case([85., 100., 0., 0.], StatusLabel::Full)]
fn status_labels(#[case] levels: [f64; 4], #[case] expected: StatusLabel) {
    assert_eq!(
        StatusLabel::from_fill_levels(&status_with(levels).fill_levels),
        expected
    );
}

#[test]
fn status_label_texts() {
    assert_eq!(StatusLabel::AlmostFull.to_string(), "Working, almost full");
    assert_eq!(StatusLabel::Pending.to_string(), "Pending");
}

#[rstest]
fn border_colors(random_seed: Seed) {
    let mut rng = make_seedable_rng(random_seed);

    let mut summary = TrashCanSummary::pending(roster_entry("1"));
    assert_eq!(summary.border_color(), BorderColor::Yellow);

    summary.apply_status(status_with([0.; 4]), NOW);
    assert_eq!(summary.border_color(), BorderColor::Green);

    summary.apply_status(status_with([100., 0., 0., 0.]), NOW);
    assert_eq!(summary.border_color(), BorderColor::Red);

    let low = f64::from(rng.random_range(1u8..80));
    summary.apply_status(status_with([0., low, 0., 0.]), NOW);
    assert_eq!(summary.status, StatusLabel::Working);
    assert_eq!(summary.border_color(), BorderColor::Gray);

    summary.mark_failed();
    assert_eq!(summary.border_color(), BorderColor::Red);
}

#[tokio::test]
async fn roster_is_cached_after_fetch() {
    let mut api = make_remoove_client_mock();
    api.expect_fetch_roster()
        .times(1)
        .returning(|| Ok(vec![roster_entry("1"), roster_entry("2")]));
    let store = make_inmemory_store();

    let view = RosterView::load(&api, store.as_ref()).await.unwrap();
    assert_eq!(view.source(), RosterSource::Server);
    assert_eq!(view.entries().len(), 2);
    assert!(view.entries().iter().all(|e| e.status == StatusLabel::Pending));
    assert!(
        view.entries()
            .iter()
            .all(|e| e.fill_levels == FillLevels::zeroed())
    );

    let cached = load_json::<Vec<TrashCanSummary>>(store.as_ref(), ROSTER_CACHE_KEY)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached, view.entries());
}

#[tokio::test]
async fn failed_fetch_falls_back_to_cache() {
    let store = make_inmemory_store();
    let cached = vec![TrashCanSummary::pending(roster_entry("7"))];
    save_json(store.as_ref(), ROSTER_CACHE_KEY, &cached)
        .await
        .unwrap();

    let mut api = make_remoove_client_mock();
    api.expect_fetch_roster().returning(|| Err(roster_error()));

    let view = RosterView::load(&api, store.as_ref()).await.unwrap();
    assert_eq!(view.source(), RosterSource::Cache);
    assert_eq!(view.entries(), cached.as_slice());
    assert_str_starts_with(&view.to_string(), "(offline");
}

#[tokio::test]
async fn failed_fetch_without_cache_is_an_error() {
    let store = make_inmemory_store();
    let mut api = make_remoove_client_mock();
    api.expect_fetch_roster().returning(|| Err(roster_error()));

    let err = RosterView::load(&api, store.as_ref()).await.unwrap_err();
    assert_eq!(err.operation(), ApiOperation::FetchRoster);
    assert_eq!(err.to_string(), "Failed to fetch home trash cans");
}

#[tokio::test]
async fn cache_write_failure_is_not_fatal() {
    let mut store = make_store_mock();
    store
        .expect_set_item()
        .times(1)
        .returning(|key, _| Err(StoreError::InvalidKey(key.to_string())));

    let mut api = make_remoove_client_mock();
    api.expect_fetch_roster()
        .returning(|| Ok(vec![roster_entry("1")]));

    let view = RosterView::load(&api, &store).await.unwrap();
    assert_eq!(view.entries().len(), 1);
}

#[rstest]
#[tokio::test]
async fn statuses_fail_independently(random_seed: Seed) {
    let mut rng = make_seedable_rng(random_seed);
    let levels = [(); 4].map(|()| gen_fill_level(&mut rng).min(79.));

    let mut api = make_remoove_client_mock();
    api.expect_fetch_roster()
        .returning(|| Ok(vec![roster_entry("1"), roster_entry("2"), roster_entry("3")]));
    api.expect_fetch_status().times(3).returning(move |id| {
        if id == "2" {
            Err(ApiError::new(
                ApiOperation::FetchStatus,
                ApiFailure::InvalidShape("missing fillLevels".to_string()),
            ))
        } else {
            Ok(status_with(levels))
        }
    });
    let store = make_inmemory_store();

    let mut view = RosterView::load(&api, store.as_ref()).await.unwrap();
    view.refresh_statuses(&api, NOW).await;

    let entries = view.entries();
    assert_eq!(entries[0].status, StatusLabel::Working);
    assert_eq!(entries[0].fill_levels, status_with(levels).fill_levels);
    assert_eq!(
        entries[0].last_updated.as_deref(),
        Some(NOW.as_local_display_string().as_str())
    );
    assert_eq!(entries[1].status, StatusLabel::Error);
    assert_eq!(entries[1].last_updated, None);
    assert_eq!(entries[2].status, StatusLabel::Working);
}

#[test]
fn render_summary() {
    let mut summary = TrashCanSummary::pending(roster_entry("3"));
    summary.apply_status(status_with([10., 20., 85., 0.]), NOW);

    let text = summary.to_string();
    assert_str_starts_with(&text, "[gray] Trash Can 3 (Building 3): Working, almost full");
    assert_str_contains(
        &text,
        "| Containers 10% | Organics 20% | Landfill 85% | Paper 0%",
    );
    assert_str_ends_with(
        &text,
        &format!("| Last updated {}", NOW.as_local_display_string()),
    );
}
