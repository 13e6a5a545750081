//! Carousel controller: rotates an index over a fixed display list.
//!
//! The controller owns the repeating timer directly, so rotation has an
//! explicit `start`/`stop` contract and can be tested without any view
//! harness. The view only reads `index()`/`current()` and calls
//! `toggle()` on click.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::{Error, Result};

/// Period between automatic index advances while rotating.
pub const SHUFFLE_PERIOD: Duration = Duration::from_millis(200);

/// Two-state rotation controller over a fixed, ordered item list.
///
/// States: `Rotating` (timer armed, index advances every period) and
/// `Paused` (no timer, index frozen). Construction yields `Paused` at
/// index 0; callers wanting the rotate-on-launch behavior call
/// [`Carousel::start`] immediately.
#[derive(Debug)]
pub struct Carousel<T: 'static> {
    items: &'static [T],
    index: Arc<AtomicUsize>,
    rotating: bool,
    period: Duration,
    timer: Option<JoinHandle<()>>,
}

impl<T> Carousel<T> {
    /// Create a paused carousel over `items`.
    ///
    /// Returns an error for an empty item list; the index invariant
    /// `0 <= index < items.len()` requires at least one item.
    pub fn new(items: &'static [T], period: Duration) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::InvalidInput(
                "Carousel needs at least one item".to_string(),
            ));
        }
        Ok(Self {
            items,
            index: Arc::new(AtomicUsize::new(0)),
            rotating: false,
            period,
            timer: None,
        })
    }

    /// Begin rotating. No-op when already rotating (flag-guarded, so a
    /// repeated call can never arm a second timer).
    pub fn start(&mut self) {
        if self.rotating {
            return;
        }
        self.arm_timer();
        self.rotating = true;
    }

    /// Stop rotating, freezing the index where it currently is.
    pub fn stop(&mut self) {
        self.disarm_timer();
        self.rotating = false;
    }

    /// Invert the rotation state (click handler contract).
    pub fn toggle(&mut self) {
        if self.rotating {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Advance the index by one position, wrapping at the end.
    pub fn advance(&self) {
        advance_index(&self.index, self.items.len());
    }

    /// Current index into the item list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// The currently displayed item.
    #[must_use]
    pub fn current(&self) -> &'static T {
        &self.items[self.index()]
    }

    /// Whether the carousel is currently rotating.
    #[must_use]
    pub const fn is_rotating(&self) -> bool {
        self.rotating
    }

    fn arm_timer(&mut self) {
        // Always clear any previous handle before arming a new one, so
        // two timers can never fire concurrently.
        self.disarm_timer();

        let index = Arc::clone(&self.index);
        let len = self.items.len();
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first interval tick completes immediately; consume it
            // so the first advance happens one full period after start.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                advance_index(&index, len);
            }
        }));
    }

    fn disarm_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T> Drop for Carousel<T> {
    fn drop(&mut self) {
        self.disarm_timer();
    }
}

fn advance_index(index: &AtomicUsize, len: usize) {
    let next = (index.load(Ordering::SeqCst) + 1) % len;
    index.store(next, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PRESETS;

    const ITEMS: &[u8] = &[10, 20, 30, 40];

    #[test]
    fn rejects_empty_item_list() {
        static EMPTY: &[u8] = &[];
        assert!(Carousel::new(EMPTY, SHUFFLE_PERIOD).is_err());
    }

    #[tokio::test]
    async fn advance_wraps_and_stays_in_range() {
        let carousel = Carousel::new(ITEMS, SHUFFLE_PERIOD).unwrap();
        for _ in 0..ITEMS.len() {
            assert!(carousel.index() < ITEMS.len());
            carousel.advance();
        }
        assert_eq!(carousel.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn rotation_advances_once_per_period() {
        let mut carousel = Carousel::new(ITEMS, SHUFFLE_PERIOD).unwrap();
        carousel.start();
        assert!(carousel.is_rotating());

        tokio::time::sleep(SHUFFLE_PERIOD * 3 + Duration::from_millis(10)).await;
        assert_eq!(carousel.index(), 3);
        carousel.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn five_ticks_over_three_presets_land_on_ponita() {
        let mut carousel = Carousel::new(PRESETS, SHUFFLE_PERIOD).unwrap();
        carousel.start();

        tokio::time::sleep(SHUFFLE_PERIOD * 5 + Duration::from_millis(10)).await;
        assert_eq!(carousel.index(), 5 % PRESETS.len());
        assert_eq!(carousel.current().name, "Ponita");
        carousel.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_freezes_and_resumes_from_frozen_index() {
        let mut carousel = Carousel::new(ITEMS, SHUFFLE_PERIOD).unwrap();
        carousel.start();

        tokio::time::sleep(SHUFFLE_PERIOD * 2 + Duration::from_millis(10)).await;
        carousel.toggle();
        assert!(!carousel.is_rotating());
        let frozen = carousel.index();
        assert_eq!(frozen, 2);

        // No ticks while paused.
        tokio::time::sleep(SHUFFLE_PERIOD * 5).await;
        assert_eq!(carousel.index(), frozen);

        // Resuming continues from the frozen index, not from 0.
        carousel.toggle();
        tokio::time::sleep(SHUFFLE_PERIOD + Duration::from_millis(10)).await;
        assert_eq!(carousel.index(), (frozen + 1) % ITEMS.len());
        carousel.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_does_not_double_tick_rate() {
        let mut carousel = Carousel::new(ITEMS, SHUFFLE_PERIOD).unwrap();
        carousel.start();
        carousel.start();

        tokio::time::sleep(SHUFFLE_PERIOD * 3 + Duration::from_millis(10)).await;
        assert_eq!(carousel.index(), 3);
        carousel.stop();
    }
}
