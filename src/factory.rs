use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use rand::Rng;

use crate::config::PopupSettings;
use crate::content::ContentRegistry;
use crate::models::{CyclePosition, PopupDescriptor, PopupId};

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Fresh identity. The sequence number alone is unique for the life of the process.
pub fn next_popup_id() -> PopupId {
    PopupId {
        created_ms: Utc::now().timestamp_millis(),
        seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
    }
}

/// Builds popup descriptors from route content and random cosmetics.
pub struct PopupFactory {
    registry: ContentRegistry,
    settings: PopupSettings,
}

impl PopupFactory {
    pub fn new(registry: ContentRegistry, settings: PopupSettings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &PopupSettings {
        &self.settings
    }

    /// Creates the popup at `cycle` for `route` and returns the advanced cycle position.
    ///
    /// Text follows the route's content strictly in order, wrapping at the end.
    /// Theme, direction and position are drawn independently of each other and of the text.
    pub fn create<R: Rng + ?Sized>(
        &self,
        route: &str,
        cycle: CyclePosition,
        rng: &mut R,
    ) -> (PopupDescriptor, CyclePosition) {
        let content = self.registry.lookup(route);
        let record = content.get(cycle.index(content.len()));
        let s = &self.settings;

        let theme = s.themes[rng.gen_range(0..s.themes.len())];
        let direction = s.directions[rng.gen_range(0..s.directions.len())];
        let top = rng.gen_range(0.0..s.vertical_max);
        let left = rng.gen_range(0.0..s.horizontal_max);

        let author = Some(record.author.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        let descriptor = PopupDescriptor {
            id: next_popup_id(),
            text: record.text.clone(),
            author,
            theme,
            direction,
            top,
            left,
            lifetime: Duration::from_millis(s.lifetime_ms),
        };
        (descriptor, cycle.advance())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::content::{ContentSet, QuotationRecord, RouteProfile};

    fn profile(name: &str) -> RouteProfile {
        RouteProfile {
            name: name.into(),
            title: String::new(),
            subtitle: String::new(),
            emoji: String::new(),
            button_text: String::new(),
            description: String::new(),
        }
    }

    fn abc_factory() -> PopupFactory {
        let abc = ["A", "B", "C"]
            .iter()
            .map(|t| QuotationRecord::new(t, "src", "someone", "cat"))
            .collect();
        let registry = ContentRegistry::new(profile("abc"), ContentSet::new("abc", abc))
            .register(
                profile("anon"),
                ContentSet::new("anon", vec![QuotationRecord::new("X", "src", "  ", "cat")]),
            );
        PopupFactory::new(registry, PopupSettings::default())
    }

    #[test]
    fn cycles_through_content_in_order() {
        let factory = abc_factory();
        let mut rng = StdRng::seed_from_u64(7);
        let mut cycle = CyclePosition::default();
        let mut texts = Vec::new();
        for _ in 0..5 {
            let (popup, next) = factory.create("abc", cycle, &mut rng);
            assert_eq!(next.0, cycle.0 + 1);
            texts.push(popup.text);
            cycle = next;
        }
        assert_eq!(texts, vec!["A", "B", "C", "A", "B"]);
    }

    #[test]
    fn cosmetics_stay_in_range() {
        let factory = abc_factory();
        let mut rng = StdRng::seed_from_u64(42);
        let mut cycle = CyclePosition::default();
        for _ in 0..500 {
            let (popup, next) = factory.create("abc", cycle, &mut rng);
            assert!((0.0..70.0).contains(&popup.top));
            assert!((0.0..85.0).contains(&popup.left));
            assert_eq!(popup.lifetime, Duration::from_millis(10_000));
            cycle = next;
        }
    }

    #[test]
    fn every_theme_and_direction_is_reachable() {
        let factory = abc_factory();
        let mut rng = StdRng::seed_from_u64(1);
        let mut themes = HashSet::new();
        let mut directions = HashSet::new();
        for _ in 0..2000 {
            let (popup, _) = factory.create("abc", CyclePosition::default(), &mut rng);
            themes.insert(popup.theme);
            directions.insert(popup.direction);
        }
        assert_eq!(themes.len(), 19);
        assert_eq!(directions.len(), 8);
    }

    #[test]
    fn blank_author_is_dropped() {
        let factory = abc_factory();
        let mut rng = StdRng::seed_from_u64(3);
        let (popup, _) = factory.create("anon", CyclePosition::default(), &mut rng);
        assert_eq!(popup.author, None);
        let (popup, _) = factory.create("abc", CyclePosition::default(), &mut rng);
        assert_eq!(popup.author.as_deref(), Some("someone"));
    }

    #[test]
    fn ids_are_unique_under_rapid_creation() {
        let factory = abc_factory();
        let mut rng = StdRng::seed_from_u64(9);
        let ids: HashSet<_> = (0..1000)
            .map(|_| factory.create("abc", CyclePosition::default(), &mut rng).0.id)
            .collect();
        assert_eq!(ids.len(), 1000);
    }
}
