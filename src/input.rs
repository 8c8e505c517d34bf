//! Button input: logical controls, events and the event queue.
//!
//! The input task (board crate) reads the I²C GPIO expander, maps each pin
//! to a [`Control`] and publishes an [`InputEvent`] for every press and
//! release edge. The UI consumes them in FIFO order through an
//! [`InputSource`], waiting at most one tick for the next event so idle
//! redraw checks stay responsive.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_time::{with_timeout, Duration};

use crate::config::BUTTON_QUEUE_DEPTH;

/// Logical controls of the badge (joystick + face buttons).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// Joystick down.
    Next,
    /// Joystick up.
    Previous,
    /// Joystick left.
    Left,
    /// Joystick right.
    Right,
    /// Joystick press.
    Shift,
    Accept,
    Back,
    Select,
    Home,
}

/// A single edge of a control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputEvent {
    pub control: Control,
    /// `true` on the press edge, `false` on the release edge.
    pub pressed: bool,
}

impl InputEvent {
    pub const fn press(control: Control) -> Self {
        Self {
            control,
            pressed: true,
        }
    }

    pub const fn release(control: Control) -> Self {
        Self {
            control,
            pressed: false,
        }
    }
}

/// Source of input events for the interaction loops.
pub trait InputSource {
    /// Wait for the next event, giving up after `timeout`.
    ///
    /// Returns `None` when no event arrived in time.
    fn next_event(
        &mut self,
        timeout: Duration,
    ) -> impl core::future::Future<Output = Option<InputEvent>>;
}

/// Bounded button queue shared by the input task and the UI.
pub type ButtonChannel<M, const N: usize> = Channel<M, InputEvent, N>;

/// The launcher's button queue.
pub type ButtonQueue<M> = ButtonChannel<M, BUTTON_QUEUE_DEPTH>;

/// Consumer end of the button queue.
pub struct ChannelInput<'a, M: RawMutex, const N: usize> {
    rx: Receiver<'a, M, InputEvent, N>,
}

impl<'a, M: RawMutex, const N: usize> ChannelInput<'a, M, N> {
    pub fn new(channel: &'a ButtonChannel<M, N>) -> Self {
        Self {
            rx: channel.receiver(),
        }
    }
}

impl<M: RawMutex, const N: usize> InputSource for ChannelInput<'_, M, N> {
    async fn next_event(&mut self, timeout: Duration) -> Option<InputEvent> {
        with_timeout(timeout, self.rx.receive()).await.ok()
    }
}

/// Producer end of the button queue.
///
/// Publishing never blocks the input task: when the UI falls behind and the
/// queue is full the event is dropped.
pub struct ButtonPublisher<'a, M: RawMutex, const N: usize> {
    tx: Sender<'a, M, InputEvent, N>,
}

impl<'a, M: RawMutex, const N: usize> ButtonPublisher<'a, M, N> {
    pub fn new(channel: &'a ButtonChannel<M, N>) -> Self {
        Self {
            tx: channel.sender(),
        }
    }

    /// Queue an event. Returns `false` if it was dropped.
    pub fn publish(&self, event: InputEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("button queue full, dropped {}", event);
                false
            }
        }
    }
}
