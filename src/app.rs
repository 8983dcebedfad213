use std::time::Instant;

use anyhow::{Result, anyhow};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Settings;
use crate::content::{ContentRegistry, RouteProfile};
use crate::driver::{AutoSpawnDriver, SpawnTick};
use crate::factory::PopupFactory;
use crate::lifecycle::PopupLifecycle;
use crate::models::{CyclePosition, PopupId, Screen};
use crate::route::RouteSelection;

/// Registry from the built-in tables with the configured default route.
pub fn build_registry(settings: &Settings) -> Result<ContentRegistry> {
    ContentRegistry::builtin()
        .with_default(&settings.default_route)
        .ok_or_else(|| anyhow!("default_route `{}` is not a known route", settings.default_route))
}

pub struct App {
    factory: PopupFactory,
    route: String,
    debug: bool,
    cycle: CyclePosition,
    lifecycle: PopupLifecycle,
    driver: AutoSpawnDriver,
    screen: Screen,
    rng: StdRng,
    running: bool,
}

impl App {
    pub fn new(
        settings: &Settings,
        registry: ContentRegistry,
        selection: RouteSelection,
        spawn_tx: UnboundedSender<SpawnTick>,
    ) -> Self {
        Self::with_rng(settings, registry, selection, spawn_tx, StdRng::from_entropy())
    }

    pub fn with_rng(
        settings: &Settings,
        registry: ContentRegistry,
        selection: RouteSelection,
        spawn_tx: UnboundedSender<SpawnTick>,
        rng: StdRng,
    ) -> Self {
        info!("route `{}` (debug: {})", selection.route, selection.debug);
        Self {
            factory: PopupFactory::new(registry, settings.popup()),
            route: selection.route,
            debug: selection.debug,
            cycle: CyclePosition::default(),
            lifecycle: PopupLifecycle::new(settings.progress_poll()),
            driver: AutoSpawnDriver::new(settings.spawn_interval(), spawn_tx),
            screen: if selection.debug { Screen::Debug } else { Screen::Welcome },
            rng,
            running: true,
        }
    }

    /// Creates the next popup for the current route and shows it.
    pub fn spawn_popup(&mut self, now: Instant) -> PopupId {
        let (popup, next) = self.factory.create(&self.route, self.cycle, &mut self.rng);
        self.cycle = next;
        let id = popup.id;
        self.lifecycle.add(popup, now);
        id
    }

    /// Spawns for a driver tick that still counts.
    ///
    /// A tick that fired before `stop()` spawns even if it is read afterwards.
    /// Ticks left over from an earlier run, or from before a route change, are dropped.
    pub fn on_spawn_tick(&mut self, tick: SpawnTick, now: Instant) -> Option<PopupId> {
        if !self.driver.accepts(&tick) {
            debug!("dropping stale spawn tick from run {}", tick.generation);
            return None;
        }
        Some(self.spawn_popup(now))
    }

    /// Advances popup timers. Returns the ids that expired.
    pub fn tick(&mut self, now: Instant) -> Vec<PopupId> {
        self.lifecycle.tick(now)
    }

    /// Leaves the welcome dialog and starts the popup stream.
    pub fn start_stream(&mut self) {
        self.screen = Screen::Stream;
        self.driver.start();
    }

    pub fn toggle_auto_spawn(&mut self) -> bool {
        self.driver.toggle()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.lifecycle.clear();
        info!("cleared {removed} popups");
        removed
    }

    /// Switches route as a fresh page load would: driver stopped, popups gone, cycle reset.
    pub fn navigate(&mut self, route: &str) {
        let registry = self.factory.registry();
        let route = if registry.contains(route) { route } else { registry.default_route() };
        let route = route.to_string();
        debug!("navigating from `{}` to `{route}`", self.route);

        self.driver.discard();
        self.lifecycle.clear();
        self.cycle = CyclePosition::default();
        self.route = route;
        self.screen = if self.debug { Screen::Debug } else { Screen::Welcome };
    }

    /// Moves `step` routes along the registry order.
    pub fn navigate_by(&mut self, step: isize) {
        let next = self.factory.registry().neighbour(&self.route, step).to_string();
        self.navigate(&next);
    }

    pub fn quit(&mut self) {
        self.driver.discard();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_auto_spawning(&self) -> bool {
        self.driver.is_running()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn profile(&self) -> &RouteProfile {
        self.factory.registry().profile(&self.route)
    }

    pub fn registry(&self) -> &ContentRegistry {
        self.factory.registry()
    }

    pub fn cycle(&self) -> CyclePosition {
        self.cycle
    }

    pub fn lifecycle(&self) -> &PopupLifecycle {
        &self.lifecycle
    }
}
