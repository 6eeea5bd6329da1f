//! Click gestures.
//!
//! Turns raw primary clicks into scene events:
//! - Click on a photo → `ItemSelected(id)`
//! - Double-click on the tree body → `ExplodeRequested`
//! - Double-click on empty background → `CollapseRequested`
//! - Double-click on a photo → `ItemSelected(id)` then `ExplodeRequested`
//!
//! Two clicks count as a double-click when they land within
//! `double_click_s` seconds and `max_travel` pixels of each other. The first
//! click of a pair has already been reported as a plain click, so a
//! double-click on a photo selects it a second time: in galaxy mode the two
//! selections cancel and focus is left where it was.

use crate::interaction::state::SceneEvent;
use crate::scene::ItemId;

/// What a click landed on, as resolved by the camera picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    Item(ItemId),
    TreeBody,
    Background,
}

/// Recognized gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Click { target: PickTarget },
    DoubleClick { target: PickTarget },
}

impl Gesture {
    /// Map a gesture onto the state machine's input vocabulary, in the
    /// order the events should be applied.
    pub fn events(&self) -> Vec<SceneEvent> {
        match self {
            Gesture::Click { target: PickTarget::Item(id) } => vec![SceneEvent::ItemSelected(id.clone())],
            Gesture::Click { .. } => Vec::new(),
            Gesture::DoubleClick { target: PickTarget::Item(id) } => {
                vec![SceneEvent::ItemSelected(id.clone()), SceneEvent::ExplodeRequested]
            }
            Gesture::DoubleClick { target: PickTarget::TreeBody } => vec![SceneEvent::ExplodeRequested],
            Gesture::DoubleClick { target: PickTarget::Background } => vec![SceneEvent::CollapseRequested],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClickRecognizer {
    /// Scene time and screen position of the last unpaired click
    last_click: Option<(f64, f32, f32)>,
    /// Double-click window in seconds
    double_click_s: f32,
    /// Maximum pointer travel between the two clicks, pixels
    max_travel: f32,
}

impl Default for ClickRecognizer {
    fn default() -> Self {
        Self {
            last_click: None,
            double_click_s: 0.3,
            max_travel: 40.0,
        }
    }
}

impl ClickRecognizer {
    /// Feed one primary click at screen `(x, y)` and time `now` (seconds).
    pub fn click(&mut self, x: f32, y: f32, now: f64, target: PickTarget) -> Gesture {
        if let Some((t0, x0, y0)) = self.last_click {
            let dx = x - x0;
            let dy = y - y0;
            let elapsed = now - t0;
            let within_time = (0.0..=f64::from(self.double_click_s)).contains(&elapsed);
            if within_time && dx * dx + dy * dy <= self.max_travel * self.max_travel {
                self.last_click = None;
                return Gesture::DoubleClick { target };
            }
        }
        self.last_click = Some((now, x, y));
        Gesture::Click { target }
    }

    /// Forget a pending first click (e.g. after a drag).
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_click_on_photo_selects() {
        let mut cr = ClickRecognizer::default();
        let g = cr.click(100.0, 100.0, 1.0, PickTarget::Item(ItemId::from("photo-2")));
        assert_eq!(g.events(), vec![SceneEvent::ItemSelected(ItemId::from("photo-2"))]);
    }

    #[test]
    fn double_click_on_tree_explodes() {
        let mut cr = ClickRecognizer::default();
        assert!(cr.click(200.0, 300.0, 1.0, PickTarget::TreeBody).events().is_empty());
        let g = cr.click(202.0, 301.0, 1.2, PickTarget::TreeBody);
        assert!(matches!(g, Gesture::DoubleClick { .. }));
        assert_eq!(g.events(), vec![SceneEvent::ExplodeRequested]);
    }

    #[test]
    fn double_click_on_background_collapses() {
        let mut cr = ClickRecognizer::default();
        cr.click(10.0, 10.0, 5.0, PickTarget::Background);
        let g = cr.click(10.0, 10.0, 5.1, PickTarget::Background);
        assert_eq!(g.events(), vec![SceneEvent::CollapseRequested]);
    }

    #[test]
    fn slow_or_distant_clicks_stay_single() {
        let mut cr = ClickRecognizer::default();
        cr.click(0.0, 0.0, 0.0, PickTarget::Background);
        assert!(matches!(cr.click(0.0, 0.0, 0.5, PickTarget::Background), Gesture::Click { .. }));
        assert!(matches!(cr.click(200.0, 0.0, 0.6, PickTarget::Background), Gesture::Click { .. }));
    }

    #[test]
    fn third_click_starts_a_new_pair() {
        let mut cr = ClickRecognizer::default();
        cr.click(0.0, 0.0, 0.0, PickTarget::TreeBody);
        assert!(matches!(cr.click(0.0, 0.0, 0.1, PickTarget::TreeBody), Gesture::DoubleClick { .. }));
        assert!(matches!(cr.click(0.0, 0.0, 0.2, PickTarget::TreeBody), Gesture::Click { .. }));
    }

    #[test]
    fn double_click_on_photo_reselects_then_explodes() {
        let mut cr = ClickRecognizer::default();
        let photo = PickTarget::Item(ItemId::from("photo-4"));
        let first = cr.click(50.0, 50.0, 2.0, photo.clone());
        assert_eq!(first.events(), vec![SceneEvent::ItemSelected(ItemId::from("photo-4"))]);
        let second = cr.click(51.0, 50.0, 2.2, photo);
        assert_eq!(
            second.events(),
            vec![SceneEvent::ItemSelected(ItemId::from("photo-4")), SceneEvent::ExplodeRequested]
        );
    }

    #[test]
    fn window_holds_late_in_a_long_session() {
        let mut cr = ClickRecognizer::default();
        let t0 = 3.0 * 86_400.0;
        cr.click(0.0, 0.0, t0, PickTarget::Background);
        assert!(matches!(cr.click(0.0, 0.0, t0 + 0.25, PickTarget::Background), Gesture::DoubleClick { .. }));
        cr.click(0.0, 0.0, t0 + 1.0, PickTarget::Background);
        assert!(matches!(cr.click(0.0, 0.0, t0 + 1.35, PickTarget::Background), Gesture::Click { .. }));
    }
}
