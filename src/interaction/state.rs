//! Scene mode and photo focus.
//!
//! Owns the scene mode (`Tree` / `Galaxy`) and the focused photo. Input
//! events are applied synchronously by [`InteractionMachine::handle`], which
//! is the only write path to either field. There is no clock here: the
//! machine moves only when an event arrives.
//!
//! ```text
//!            ExplodeRequested
//!   Tree ───────────────────────▶ Galaxy ◀─┐ ItemSelected(id):
//!    ▲                             │       │   focused == id → None
//!    └──── CollapseRequested ──────┘───────┘   otherwise     → Some(id)
//!          (clears focus)
//! ```
//!
//! Every accepted change bumps [`InteractionMachine::revision`]; animators
//! compare revisions instead of diffing state.

use std::collections::HashSet;

use crate::scene::ItemId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneMode {
    #[default]
    Tree,
    Galaxy,
}

/// The `(mode, focused)` tuple consumed by animators and the camera.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SceneState {
    pub mode: SceneMode,
    /// Only ever `Some` in galaxy mode
    pub focused: Option<ItemId>,
}

impl SceneState {
    pub fn is_focused(&self, id: &ItemId) -> bool {
        self.mode == SceneMode::Galaxy && self.focused.as_ref() == Some(id)
    }

    /// Camera spins on its own only around an idle tree.
    pub fn auto_rotate(&self) -> bool {
        self.mode == SceneMode::Tree && self.focused.is_none()
    }

    /// Zoom is disabled in galaxy mode so the camera cannot dive through the cloud.
    pub fn zoom_enabled(&self) -> bool {
        self.mode == SceneMode::Tree
    }
}

/// Input relayed by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneEvent {
    /// Double-click on the tree body
    ExplodeRequested,
    /// Double-click on empty background
    CollapseRequested,
    /// Click on an item
    ItemSelected(ItemId),
}

/// How explode/collapse requests are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TogglePolicy {
    /// Explode only from `Tree`, collapse only from `Galaxy`; anything else
    /// is a no-op.
    #[default]
    SeparateTargets,
    /// Either request flips the mode, clearing focus in both directions.
    SingleToggle,
}

#[derive(Debug, Clone)]
pub struct InteractionMachine {
    state: SceneState,
    policy: TogglePolicy,
    selectable: HashSet<ItemId>,
    revision: u64,
}

impl InteractionMachine {
    pub fn new<I>(policy: TogglePolicy, selectable: I) -> Self
    where
        I: IntoIterator<Item = ItemId>,
    {
        Self {
            state: SceneState::default(),
            policy,
            selectable: selectable.into_iter().collect(),
            revision: 0,
        }
    }

    pub fn state(&self) -> &SceneState {
        &self.state
    }

    pub fn mode(&self) -> SceneMode {
        self.state.mode
    }

    pub fn focused(&self) -> Option<&ItemId> {
        self.state.focused.as_ref()
    }

    /// Incremented on every accepted state change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one event. Returns `true` if the state changed.
    pub fn handle(&mut self, event: SceneEvent) -> bool {
        let next = match (&event, self.policy) {
            (SceneEvent::ExplodeRequested | SceneEvent::CollapseRequested, TogglePolicy::SingleToggle) => {
                let mode = match self.state.mode {
                    SceneMode::Tree => SceneMode::Galaxy,
                    SceneMode::Galaxy => SceneMode::Tree,
                };
                Some(SceneState { mode, focused: None })
            }
            (SceneEvent::ExplodeRequested, TogglePolicy::SeparateTargets) => match self.state.mode {
                SceneMode::Tree => Some(SceneState {
                    mode: SceneMode::Galaxy,
                    focused: self.state.focused.clone(),
                }),
                SceneMode::Galaxy => None,
            },
            (SceneEvent::CollapseRequested, TogglePolicy::SeparateTargets) => match self.state.mode {
                SceneMode::Galaxy => Some(SceneState { mode: SceneMode::Tree, focused: None }),
                SceneMode::Tree => None,
            },
            (SceneEvent::ItemSelected(id), _) => self.select(id),
        };

        match next {
            Some(next) if next != self.state => {
                log::debug!(
                    "{:?}: {:?}/{:?} -> {:?}/{:?}",
                    event,
                    self.state.mode,
                    self.state.focused,
                    next.mode,
                    next.focused
                );
                self.state = next;
                self.revision += 1;
                true
            }
            _ => {
                log::debug!("{:?} ignored in {:?}", event, self.state.mode);
                false
            }
        }
    }

    fn select(&self, id: &ItemId) -> Option<SceneState> {
        if self.state.mode != SceneMode::Galaxy || !self.selectable.contains(id) {
            return None;
        }
        let focused = if self.state.focused.as_ref() == Some(id) {
            None
        } else {
            Some(id.clone())
        };
        Some(SceneState { mode: SceneMode::Galaxy, focused })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(policy: TogglePolicy) -> InteractionMachine {
        InteractionMachine::new(policy, (0..10).map(|i| ItemId::new("p", i)))
    }

    fn select(m: &mut InteractionMachine, id: &str) -> bool {
        m.handle(SceneEvent::ItemSelected(ItemId::from(id)))
    }

    #[test]
    fn starts_as_tree_without_focus() {
        let m = machine(TogglePolicy::default());
        assert_eq!(m.mode(), SceneMode::Tree);
        assert!(m.focused().is_none());
        assert_eq!(m.revision(), 0);
    }

    #[test]
    fn explode_then_collapse() {
        let mut m = machine(TogglePolicy::SeparateTargets);
        assert!(m.handle(SceneEvent::ExplodeRequested));
        assert_eq!(m.mode(), SceneMode::Galaxy);
        assert!(m.focused().is_none());

        select(&mut m, "p-3");
        assert!(m.handle(SceneEvent::CollapseRequested));
        assert_eq!(m.mode(), SceneMode::Tree);
        assert!(m.focused().is_none(), "collapse must clear focus");
    }

    #[test]
    fn select_toggles_and_switches_directly() {
        let mut m = machine(TogglePolicy::SeparateTargets);
        m.handle(SceneEvent::ExplodeRequested);

        assert!(select(&mut m, "p-3"));
        assert_eq!(m.focused().map(ItemId::as_str), Some("p-3"));

        assert!(select(&mut m, "p-3"));
        assert!(m.focused().is_none());

        select(&mut m, "p-3");
        let before = m.revision();
        assert!(select(&mut m, "p-7"));
        assert_eq!(m.focused().map(ItemId::as_str), Some("p-7"));
        assert_eq!(m.revision(), before + 1, "refocus is one atomic update");
    }

    #[test]
    fn redundant_requests_are_noops() {
        let mut m = machine(TogglePolicy::SeparateTargets);
        assert!(!m.handle(SceneEvent::CollapseRequested));
        assert_eq!(m.mode(), SceneMode::Tree);

        m.handle(SceneEvent::ExplodeRequested);
        select(&mut m, "p-2");
        let rev = m.revision();
        assert!(!m.handle(SceneEvent::ExplodeRequested));
        assert_eq!(m.mode(), SceneMode::Galaxy);
        assert_eq!(m.focused().map(ItemId::as_str), Some("p-2"));
        assert_eq!(m.revision(), rev);
    }

    #[test]
    fn selection_outside_galaxy_or_unknown_is_ignored() {
        let mut m = machine(TogglePolicy::SeparateTargets);
        assert!(!select(&mut m, "p-1"));
        assert!(m.focused().is_none());

        m.handle(SceneEvent::ExplodeRequested);
        assert!(!select(&mut m, "nope-99"));
        assert!(m.focused().is_none());
    }

    #[test]
    fn single_toggle_flips_and_clears_focus() {
        let mut m = machine(TogglePolicy::SingleToggle);
        assert!(m.handle(SceneEvent::ExplodeRequested));
        assert_eq!(m.mode(), SceneMode::Galaxy);
        select(&mut m, "p-4");

        // Same gesture, either event name, flips back.
        assert!(m.handle(SceneEvent::ExplodeRequested));
        assert_eq!(m.mode(), SceneMode::Tree);
        assert!(m.focused().is_none());

        assert!(m.handle(SceneEvent::CollapseRequested));
        assert_eq!(m.mode(), SceneMode::Galaxy);
        assert!(m.focused().is_none());
    }

    #[test]
    fn camera_gating() {
        let mut m = machine(TogglePolicy::SeparateTargets);
        assert!(m.state().auto_rotate());
        assert!(m.state().zoom_enabled());
        m.handle(SceneEvent::ExplodeRequested);
        assert!(!m.state().auto_rotate());
        assert!(!m.state().zoom_enabled());
    }
}
