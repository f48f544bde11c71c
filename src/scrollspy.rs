//! Scroll-synchronized active-section tracking.
//!
//! The controller watches visibility observations for a fixed, ordered set
//! of section ids and keeps three things consistent: the active section,
//! the address fragment, and the scroll position. Scrolling drives the
//! address (replace, never push); history navigation drives scrolling; and
//! explicit navigation (sidebar activation, next/previous section) drives
//! both and creates a history entry.
//!
//! Geometry access goes through the [`ScrollPort`] trait so tests can
//! synthesize observations and scroll targets without a layout engine.

use crate::location::Location;

/// One visibility record for a section, as of the latest geometry pass
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub id: String,
    /// Visible fraction reached the configured threshold inside the
    /// inset viewport
    pub is_intersecting: bool,
    /// Visible fraction of the section, 0.0 to 1.0
    pub ratio: f64,
    /// Rows from the viewport top to the section top; negative when the
    /// section starts above the viewport
    pub top: i32,
}

/// Fractional viewport insets forming the "reading band". Sections span
/// the full content width, so only the vertical insets participate.
#[derive(Debug, Clone, Copy)]
pub struct RootMargin {
    pub top: f64,
    pub bottom: f64,
}

/// Tuning knobs for the controller. The defaults are empirically chosen
/// UX constants, kept configurable rather than baked in.
#[derive(Debug, Clone)]
pub struct SpyConfig {
    /// Reading-band insets (fraction of the viewport height)
    pub root_margin: RootMargin,
    /// Minimum visible fraction before a section counts as intersecting
    pub threshold: f64,
    /// Ratio difference below which two candidates are considered tied
    pub tie_band: f64,
    /// Rows kept clear above a section when scrolling to it
    pub header_clearance: i32,
    /// Ticks to wait before the one-time initial scroll, letting the
    /// first layout settle
    pub initial_scroll_delay: u8,
    /// Ticks after a manual navigation during which observation batches
    /// are ignored, so an in-flight smooth scroll cannot overwrite the
    /// just-set active section
    pub settle_ticks: u8,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            root_margin: RootMargin {
                top: 0.20,
                bottom: 0.35,
            },
            threshold: 0.1,
            tie_band: 0.1,
            header_clearance: 4,
            initial_scroll_delay: 3,
            settle_ticks: 12,
        }
    }
}

/// Capability the controller needs from the scroll/layout side: resolve a
/// section's absolute content row, and request a smooth scroll. The scroll
/// is fire-and-forget; the controller never waits for it to finish.
pub trait ScrollPort {
    fn section_top(&self, id: &str) -> Option<i32>;
    fn scroll_to(&mut self, row: i32);
}

/// The scroll-spy controller
#[derive(Debug)]
pub struct ScrollSpy {
    ids: Vec<String>,
    config: SpyConfig,
    active: Option<String>,
    /// Bumped on every manual navigation; observation batches captured
    /// under an older generation are stale and ignored
    generation: u64,
    settle: u8,
    /// Seeded section id and remaining ticks for the one-time delayed
    /// initial scroll; the id is captured up front so interim state
    /// changes cannot redirect the scroll
    pending_initial: Option<(String, u8)>,
    torn_down: bool,
}

impl ScrollSpy {
    pub fn new(ids: Vec<String>, config: SpyConfig) -> Self {
        Self {
            ids,
            config,
            active: None,
            generation: 0,
            settle: 0,
            pending_initial: None,
            torn_down: false,
        }
    }

    /// The section currently considered "in view", if any
    pub fn active_section(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    /// Current navigation generation; pass this back with observation
    /// batches derived from current state
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn is_member(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Determine the initial active section: the current fragment when it
    /// names a known section (scheduling a delayed scroll to it), else the
    /// first id, else none. An empty id sequence leaves the controller
    /// inactive; that is not an error.
    pub fn init(&mut self, location: &Location) {
        let fragment = location.current();
        if !fragment.is_empty() && self.is_member(fragment) {
            self.active = Some(fragment.to_string());
            self.pending_initial =
                Some((fragment.to_string(), self.config.initial_scroll_delay));
            // Hold observation batches off until the scroll request goes
            // out, or the seeded section would be overwritten by whatever
            // is visible at the top of the page
            self.settle = self.config.initial_scroll_delay.saturating_add(1);
        } else if let Some(first) = self.ids.first() {
            self.active = Some(first.clone());
        }
    }

    /// Advance timers: the settle window and the pending initial scroll.
    /// The initial scroll fires without creating a history entry.
    pub fn tick<P: ScrollPort>(&mut self, port: &mut P, location: &mut Location) {
        if self.torn_down {
            return;
        }
        self.settle = self.settle.saturating_sub(1);
        if let Some((id, remaining)) = self.pending_initial.take() {
            if remaining == 0 {
                self.scroll_to_section(&id, false, port, location);
            } else {
                self.pending_initial = Some((id, remaining - 1));
            }
        }
    }

    /// Navigate to a section. A no-op when the section has no layout
    /// presence. Otherwise requests a smooth scroll that leaves
    /// `header_clearance` rows above the section, sets the active section
    /// immediately (optimistic, not waiting for observations to confirm
    /// arrival), and, when `update_history` is set, pushes a new history
    /// entry for the fragment.
    pub fn scroll_to_section<P: ScrollPort>(
        &mut self,
        id: &str,
        update_history: bool,
        port: &mut P,
        location: &mut Location,
    ) {
        if self.torn_down {
            return;
        }
        let Some(top) = port.section_top(id) else {
            return;
        };
        let target = (top - self.config.header_clearance).max(0);
        port.scroll_to(target);
        self.active = Some(id.to_string());
        self.generation += 1;
        self.settle = self.config.settle_ticks;
        if update_history {
            location.push(id);
        }
    }

    /// Apply a batch of visibility observations. Stale batches (older
    /// generation), batches arriving during the settle window, and batches
    /// after teardown are ignored. When no candidate intersects, the
    /// previous active section is retained to avoid flicker between
    /// reading bands. The address fragment is synchronized via replace so
    /// scrolling never pollutes history.
    pub fn handle_observations(
        &mut self,
        batch: &[Observation],
        generation: u64,
        location: &mut Location,
    ) {
        if self.torn_down || generation < self.generation || self.settle > 0 {
            return;
        }
        let candidates: Vec<&Observation> = batch
            .iter()
            .filter(|obs| obs.is_intersecting && self.is_member(&obs.id))
            .collect();
        let Some(winner) = select_active(&candidates, self.config.tie_band) else {
            return;
        };
        self.active = Some(winner.id.clone());
        if location.current() != winner.id {
            location.replace(&winner.id);
        }
    }

    /// React to a fragment change from history navigation. Unknown or
    /// empty fragments are ignored; valid ones become active and are
    /// scrolled to without creating a further history entry.
    pub fn handle_fragment_change<P: ScrollPort>(
        &mut self,
        fragment: &str,
        port: &mut P,
        location: &mut Location,
    ) {
        if self.torn_down {
            return;
        }
        if fragment.is_empty() || !self.is_member(fragment) {
            return;
        }
        self.active = Some(fragment.to_string());
        self.scroll_to_section(fragment, false, port, location);
    }

    /// Stop reacting to everything. Safe to call repeatedly; cancels the
    /// pending initial scroll so no delayed callback fires afterwards.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.pending_initial = None;
    }
}

/// Pick the winning candidate: candidates whose ratios differ by less
/// than `tie_band` are tied and the one closer to the viewport top wins;
/// otherwise the more visible one wins.
fn select_active<'a>(candidates: &[&'a Observation], tie_band: f64) -> Option<&'a Observation> {
    let mut best: Option<&Observation> = None;
    for &candidate in candidates {
        best = Some(match best {
            None => candidate,
            Some(current) => {
                let tied = (candidate.ratio - current.ratio).abs() < tie_band;
                let wins = if tied {
                    candidate.top < current.top
                } else {
                    candidate.ratio > current.ratio
                };
                if wins {
                    candidate
                } else {
                    current
                }
            }
        });
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Synthetic scroll port: fixed section tops, records scroll requests
    struct FakePort {
        tops: HashMap<String, i32>,
        scrolled_to: Vec<i32>,
    }

    impl FakePort {
        fn new(tops: &[(&str, i32)]) -> Self {
            Self {
                tops: tops
                    .iter()
                    .map(|(id, top)| (id.to_string(), *top))
                    .collect(),
                scrolled_to: Vec::new(),
            }
        }
    }

    impl ScrollPort for FakePort {
        fn section_top(&self, id: &str) -> Option<i32> {
            self.tops.get(id).copied()
        }

        fn scroll_to(&mut self, row: i32) {
            self.scrolled_to.push(row);
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn obs(id: &str, ratio: f64, top: i32) -> Observation {
        Observation {
            id: id.to_string(),
            is_intersecting: true,
            ratio,
            top,
        }
    }

    fn no_settle_config() -> SpyConfig {
        SpyConfig {
            settle_ticks: 0,
            ..SpyConfig::default()
        }
    }

    #[test]
    fn test_init_from_valid_fragment() {
        let location = Location::with_fragment("hooks");
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks", "events"]), SpyConfig::default());
        spy.init(&location);
        assert_eq!(spy.active_section(), Some("hooks"));
    }

    #[test]
    fn test_init_defaults_to_first_section() {
        let location = Location::with_fragment("nonsense");
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), SpyConfig::default());
        spy.init(&location);
        assert_eq!(spy.active_section(), Some("intro"));
    }

    #[test]
    fn test_init_with_empty_ids_stays_inactive() {
        let location = Location::new();
        let mut spy = ScrollSpy::new(Vec::new(), SpyConfig::default());
        spy.init(&location);
        assert_eq!(spy.active_section(), None);
    }

    #[test]
    fn test_initial_scroll_fires_after_delay_without_history() {
        let mut location = Location::with_fragment("hooks");
        let config = SpyConfig {
            initial_scroll_delay: 2,
            ..SpyConfig::default()
        };
        let clearance = config.header_clearance;
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), config);
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0), ("hooks", 40)]);

        spy.tick(&mut port, &mut location);
        spy.tick(&mut port, &mut location);
        assert!(port.scrolled_to.is_empty());
        spy.tick(&mut port, &mut location);
        assert_eq!(port.scrolled_to, vec![40 - clearance]);
        assert_eq!(location.len(), 1, "initial scroll must not push history");

        // One-time only
        spy.tick(&mut port, &mut location);
        assert_eq!(port.scrolled_to.len(), 1);
    }

    #[test]
    fn test_initial_scroll_keeps_seeded_target_despite_batches() {
        let mut location = Location::with_fragment("hooks");
        let config = SpyConfig {
            initial_scroll_delay: 2,
            ..SpyConfig::default()
        };
        let clearance = config.header_clearance;
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), config);
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0), ("hooks", 40)]);

        // Each frame the top of the page reports full visibility while
        // the delayed scroll is still counting down
        for _ in 0..3 {
            spy.tick(&mut port, &mut location);
            spy.handle_observations(&[obs("intro", 1.0, 0)], spy.generation(), &mut location);
        }

        assert_eq!(spy.active_section(), Some("hooks"));
        assert_eq!(port.scrolled_to, vec![40 - clearance]);
        assert_eq!(location.current(), "hooks");
    }

    #[test]
    fn test_scroll_to_section_sets_active_and_pushes_history() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), SpyConfig::default());
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0), ("hooks", 100)]);

        spy.scroll_to_section("hooks", true, &mut port, &mut location);
        assert_eq!(spy.active_section(), Some("hooks"));
        assert_eq!(location.current(), "hooks");
        assert_eq!(port.scrolled_to, vec![100 - spy.config().header_clearance]);

        // Back navigation restores the prior fragment
        assert_eq!(location.back(), Some(""));
    }

    #[test]
    fn test_scroll_to_missing_section_is_noop() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["intro"]), SpyConfig::default());
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0)]);

        spy.scroll_to_section("missing-id", true, &mut port, &mut location);
        assert_eq!(spy.active_section(), Some("intro"));
        assert_eq!(location.current(), "");
        assert!(port.scrolled_to.is_empty());
    }

    #[test]
    fn test_scroll_target_clamped_at_top() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["intro"]), SpyConfig::default());
        let mut port = FakePort::new(&[("intro", 1)]);
        spy.scroll_to_section("intro", false, &mut port, &mut location);
        assert_eq!(port.scrolled_to, vec![0]);
    }

    #[test]
    fn test_tied_candidates_prefer_higher_on_page() {
        // Ratios 0.9 vs 0.85 differ by less than the 0.1 tie band, so the
        // candidate closer to the viewport top wins.
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["a", "b"]), no_settle_config());
        spy.handle_observations(
            &[obs("a", 0.9, 50), obs("b", 0.85, 10)],
            0,
            &mut location,
        );
        assert_eq!(spy.active_section(), Some("b"));
        assert_eq!(location.current(), "b");
    }

    #[test]
    fn test_untied_candidates_prefer_higher_ratio() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["a", "c"]), no_settle_config());
        spy.handle_observations(
            &[obs("a", 0.9, 10), obs("c", 0.3, 5)],
            0,
            &mut location,
        );
        assert_eq!(spy.active_section(), Some("a"));
    }

    #[test]
    fn test_no_intersection_retains_previous_active() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["a", "b"]), no_settle_config());
        spy.init(&location);
        assert_eq!(spy.active_section(), Some("a"));

        let gone = Observation {
            id: "b".to_string(),
            is_intersecting: false,
            ratio: 0.0,
            top: -40,
        };
        spy.handle_observations(&[gone], 0, &mut location);
        assert_eq!(spy.active_section(), Some("a"));
        assert_eq!(location.current(), "");
    }

    #[test]
    fn test_unknown_ids_in_batch_ignored() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["a"]), no_settle_config());
        spy.handle_observations(&[obs("stranger", 1.0, 0)], 0, &mut location);
        assert_eq!(spy.active_section(), None);
    }

    #[test]
    fn test_observation_sync_replaces_instead_of_pushing() {
        let mut location = Location::with_fragment("a");
        let mut spy = ScrollSpy::new(ids(&["a", "b"]), no_settle_config());
        spy.init(&location);

        spy.handle_observations(&[obs("b", 0.8, 3)], 0, &mut location);
        assert_eq!(location.current(), "b");
        assert_eq!(location.len(), 1);

        // Same fragment again: no write at all
        spy.handle_observations(&[obs("b", 0.9, 2)], 0, &mut location);
        assert_eq!(location.len(), 1);
    }

    #[test]
    fn test_stale_generation_batch_cannot_overwrite_manual_navigation() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["a", "b"]), no_settle_config());
        spy.init(&location);
        let mut port = FakePort::new(&[("a", 0), ("b", 80)]);

        let stale_generation = spy.generation();
        spy.scroll_to_section("b", true, &mut port, &mut location);

        // A batch queued before the navigation arrives late
        spy.handle_observations(&[obs("a", 1.0, 0)], stale_generation, &mut location);
        assert_eq!(spy.active_section(), Some("b"));

        // A batch derived after the navigation is applied
        spy.handle_observations(&[obs("a", 1.0, 0)], spy.generation(), &mut location);
        assert_eq!(spy.active_section(), Some("a"));
    }

    #[test]
    fn test_settle_window_suppresses_batches_until_elapsed() {
        let mut location = Location::new();
        let config = SpyConfig {
            settle_ticks: 2,
            ..SpyConfig::default()
        };
        let mut spy = ScrollSpy::new(ids(&["a", "b"]), config);
        spy.init(&location);
        let mut port = FakePort::new(&[("a", 0), ("b", 80)]);

        spy.scroll_to_section("b", false, &mut port, &mut location);
        spy.handle_observations(&[obs("a", 1.0, 0)], spy.generation(), &mut location);
        assert_eq!(spy.active_section(), Some("b"));

        spy.tick(&mut port, &mut location);
        spy.tick(&mut port, &mut location);
        spy.handle_observations(&[obs("a", 1.0, 0)], spy.generation(), &mut location);
        assert_eq!(spy.active_section(), Some("a"));
    }

    #[test]
    fn test_fragment_change_scrolls_without_new_history_entry() {
        let mut location = Location::new();
        location.push("hooks");
        location.back();
        location.forward();
        let entries_before = location.len();

        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), SpyConfig::default());
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0), ("hooks", 60)]);

        spy.handle_fragment_change("hooks", &mut port, &mut location);
        assert_eq!(spy.active_section(), Some("hooks"));
        assert_eq!(location.len(), entries_before);
        assert_eq!(port.scrolled_to.len(), 1);
    }

    #[test]
    fn test_fragment_change_ignores_unknown_and_empty() {
        let mut location = Location::new();
        let mut spy = ScrollSpy::new(ids(&["intro"]), SpyConfig::default());
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0)]);

        spy.handle_fragment_change("", &mut port, &mut location);
        spy.handle_fragment_change("nope", &mut port, &mut location);
        assert_eq!(spy.active_section(), Some("intro"));
        assert!(port.scrolled_to.is_empty());
    }

    #[test]
    fn test_teardown_silences_late_callbacks() {
        let mut location = Location::with_fragment("hooks");
        let mut spy = ScrollSpy::new(ids(&["intro", "hooks"]), no_settle_config());
        spy.init(&location);
        let mut port = FakePort::new(&[("intro", 0), ("hooks", 60)]);

        spy.teardown();
        spy.teardown(); // idempotent

        spy.handle_observations(&[obs("intro", 1.0, 0)], spy.generation(), &mut location);
        spy.handle_fragment_change("intro", &mut port, &mut location);
        spy.scroll_to_section("intro", true, &mut port, &mut location);
        // The pending initial scroll must have been cancelled too
        for _ in 0..10 {
            spy.tick(&mut port, &mut location);
        }

        assert_eq!(spy.active_section(), Some("hooks"));
        assert!(port.scrolled_to.is_empty());
        assert_eq!(location.len(), 1);
    }
}
