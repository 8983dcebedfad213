use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

use quotepop::app::{App, build_registry};
use quotepop::config::Settings;
use quotepop::content::ContentRegistry;
use quotepop::driver::SpawnTick;
use quotepop::factory::PopupFactory;
use quotepop::models::{CyclePosition, Screen};
use quotepop::route::RouteSelection;

fn app_at(location: &str) -> (App, mpsc::UnboundedReceiver<SpawnTick>) {
    let settings = Settings::from_toml("").unwrap();
    let registry = build_registry(&settings).unwrap();
    let selection = RouteSelection::parse(location, &registry);
    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::with_rng(&settings, registry, selection, tx, StdRng::seed_from_u64(11));
    (app, rx)
}

fn texts(app: &App) -> Vec<String> {
    app.lifecycle()
        .visible()
        .iter()
        .map(|p| p.descriptor.text.clone())
        .collect()
}

#[test]
fn unknown_route_creates_the_same_popups_as_default() {
    let settings = Settings::from_toml("").unwrap();
    let factory = PopupFactory::new(ContentRegistry::builtin(), settings.popup());
    let mut known_rng = StdRng::seed_from_u64(5);
    let mut unknown_rng = StdRng::seed_from_u64(5);
    let (mut known_cycle, mut unknown_cycle) = (CyclePosition::default(), CyclePosition::default());

    for _ in 0..20 {
        let (known, next_known) = factory.create("poems", known_cycle, &mut known_rng);
        let (unknown, next_unknown) =
            factory.create("no-such-route", unknown_cycle, &mut unknown_rng);
        assert_eq!(known.text, unknown.text);
        assert_eq!(known.author, unknown.author);
        assert_eq!(known.theme, unknown.theme);
        assert_eq!(known.direction, unknown.direction);
        assert_eq!(known.top, unknown.top);
        assert_eq!(known.left, unknown.left);
        assert_ne!(known.id, unknown.id);
        known_cycle = next_known;
        unknown_cycle = next_unknown;
    }
}

#[test]
fn nth_popup_takes_the_nth_record_wrapping() {
    let (mut app, _rx) = app_at("/chen?debug");
    let content = ContentRegistry::builtin().lookup("chen").clone();
    let now = Instant::now();
    for _ in 0..25 {
        app.spawn_popup(now);
    }
    let expected: Vec<String> = (0..25).map(|n| content.get(n).text.clone()).collect();
    assert_eq!(texts(&app), expected);
    assert_eq!(app.cycle(), CyclePosition(25));
}

#[test]
fn navigating_resets_cycle_and_clears_popups() {
    let (mut app, _rx) = app_at("/poems?debug");
    let now = Instant::now();
    app.spawn_popup(now);
    app.spawn_popup(now);

    app.navigate("chen");
    assert_eq!(app.route(), "chen");
    assert!(app.lifecycle().is_empty());
    assert_eq!(app.cycle(), CyclePosition::default());
    assert_eq!(app.screen(), Screen::Debug);

    app.spawn_popup(now);
    assert_eq!(texts(&app), vec!["祝你岁岁安康，年年如意。".to_string()]);

    app.navigate("bogus");
    assert_eq!(app.route(), "poems");
}

#[test]
fn welcome_screen_unless_debug() {
    let (app, _rx) = app_at("/chen");
    assert_eq!(app.screen(), Screen::Welcome);
    assert_eq!(app.profile().name, "chen");
}

#[test]
fn clear_then_late_expiry_is_harmless() {
    let (mut app, _rx) = app_at("/?debug");
    let t0 = Instant::now();
    for _ in 0..4 {
        app.spawn_popup(t0);
    }
    assert_eq!(app.clear(), 4);
    assert!(app.tick(t0 + Duration::from_secs(60)).is_empty());
    assert!(app.lifecycle().is_empty());
}

#[test]
fn popups_expire_after_default_lifetime() {
    let (mut app, _rx) = app_at("/?debug");
    let t0 = Instant::now();
    let id = app.spawn_popup(t0);
    assert!(app.tick(t0 + Duration::from_millis(9_990)).is_empty());
    assert!(app.lifecycle().contains(&id));
    assert_eq!(app.tick(t0 + Duration::from_millis(10_010)), vec![id]);
    assert!(!app.lifecycle().contains(&id));
}

fn feed_ticks(app: &mut App, rx: &mut mpsc::UnboundedReceiver<SpawnTick>) -> usize {
    let mut spawned = 0;
    while let Ok(tick) = rx.try_recv() {
        if app.on_spawn_tick(tick, Instant::now()).is_some() {
            spawned += 1;
        }
    }
    spawned
}

#[tokio::test(start_paused = true)]
async fn one_spawn_period_adds_exactly_one_popup() {
    let (mut app, mut rx) = app_at("/?debug");
    assert!(app.toggle_auto_spawn());

    tokio::time::sleep(Duration::from_millis(171)).await;
    assert!(!app.toggle_auto_spawn());
    // The tick fired while running, so it counts even though it is read after the stop.
    assert_eq!(feed_ticks(&mut app, &mut rx), 1);
    assert_eq!(app.lifecycle().len(), 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn restart_drops_ticks_from_the_previous_run() {
    let (mut app, mut rx) = app_at("/?debug");
    app.toggle_auto_spawn();
    tokio::time::sleep(Duration::from_millis(171)).await;
    app.toggle_auto_spawn();
    app.toggle_auto_spawn();

    assert_eq!(feed_ticks(&mut app, &mut rx), 0);
    assert!(app.lifecycle().is_empty());

    // The new run's first tick arrives a full period after the restart.
    tokio::time::sleep(Duration::from_millis(171)).await;
    assert_eq!(feed_ticks(&mut app, &mut rx), 1);
}

#[tokio::test(start_paused = true)]
async fn route_change_drops_queued_ticks() {
    let (mut app, mut rx) = app_at("/poems");
    app.start_stream();
    tokio::time::sleep(Duration::from_millis(171)).await;

    app.navigate("chen");
    assert_eq!(feed_ticks(&mut app, &mut rx), 0);

    app.start_stream();
    assert_eq!(feed_ticks(&mut app, &mut rx), 0);
    assert!(app.lifecycle().is_empty());
    assert_eq!(app.cycle(), CyclePosition::default());
}

#[tokio::test(start_paused = true)]
async fn welcome_enter_starts_the_stream() {
    let (mut app, mut rx) = app_at("/poems");
    app.start_stream();
    assert_eq!(app.screen(), Screen::Stream);
    assert!(app.is_auto_spawning());

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(feed_ticks(&mut app, &mut rx), 2);

    app.quit();
    assert!(!app.is_running());
    assert!(!app.is_auto_spawning());
}
