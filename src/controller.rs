//! Sources of the per-frame control signal that drives a vehicle.

use std::collections::VecDeque;

/// The four-channel control signal applied to a vehicle for one frame.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlSignal {
    /// Throttle forward.
    pub forward: bool,
    /// Throttle in reverse.
    pub reverse: bool,
    /// Steer left.
    pub left: bool,
    /// Steer right.
    pub right: bool,
}

impl ControlSignal {
    /// The signal with no channel engaged.
    pub const NONE: Self = Self {
        forward: false,
        reverse: false,
        left: false,
        right: false,
    };

    /// The signal with only the forward channel engaged.
    pub const FORWARD: Self = Self {
        forward: true,
        reverse: false,
        left: false,
        right: false,
    };
}

/// A control channel that external input can press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Button {
    Forward,
    Reverse,
    Left,
    Right,
}

/// An edge-triggered input event captured outside the simulation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub button: Button,
    pub pressed: bool,
}

impl InputEvent {
    /// A press of the given button.
    pub const fn press(button: Button) -> Self {
        Self {
            button,
            pressed: true,
        }
    }

    /// A release of the given button.
    pub const fn release(button: Button) -> Self {
        Self {
            button,
            pressed: false,
        }
    }
}

/// Replays externally captured input events.
///
/// Events are queued from outside the simulation (e.g. a window's key
/// handlers) and drained once per frame, so the signal a vehicle sees is a
/// function of an explicit event snapshot rather than hidden global state.
/// A channel stays engaged until its release event arrives; nothing decays
/// implicitly.
#[derive(Clone, Debug, Default)]
pub struct InputController {
    queue: VecDeque<InputEvent>,
    signal: ControlSignal,
}

impl InputController {
    /// Creates a controller with an empty queue and no channels engaged.
    pub fn new() -> Self {
        Default::default()
    }

    /// Queues an input event for the next frame.
    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    /// Drains queued events and returns the resulting signal.
    fn latest(&mut self) -> ControlSignal {
        while let Some(event) = self.queue.pop_front() {
            let channel = match event.button {
                Button::Forward => &mut self.signal.forward,
                Button::Reverse => &mut self.signal.reverse,
                Button::Left => &mut self.signal.left,
                Button::Right => &mut self.signal.right,
            };
            *channel = event.pressed;
        }
        self.signal
    }
}

/// A steering policy: turns the sensor's proximity vector into a control
/// signal.
///
/// Each element of `proximity` is `1 - offset` of the corresponding ray's
/// reading, or zero where the ray is unobstructed, so larger values mean
/// closer obstacles. Any decision strategy satisfies this uniformly; no
/// assumptions are made about its internals.
pub trait Policy {
    fn decide(&mut self, proximity: &[f64]) -> ControlSignal;
}

impl<F: FnMut(&[f64]) -> ControlSignal> Policy for F {
    fn decide(&mut self, proximity: &[f64]) -> ControlSignal {
        self(proximity)
    }
}

/// The source of a vehicle's control signal.
pub enum Controller {
    /// Holds the signal constant. Used for scripted traffic.
    Fixed(ControlSignal),
    /// Driven by externally captured input events.
    Input(InputController),
    /// Derives the signal from the sensor's proximity vector.
    Policy(Box<dyn Policy>),
}

impl Controller {
    /// A controller that always drives forward, for simple traffic.
    pub fn dummy() -> Self {
        Controller::Fixed(ControlSignal::FORWARD)
    }

    /// An input-driven controller with an empty event queue.
    pub fn input() -> Self {
        Controller::Input(InputController::new())
    }

    /// Wraps a steering policy.
    pub fn policy(policy: impl Policy + 'static) -> Self {
        Controller::Policy(Box::new(policy))
    }

    /// Produces the control signal for the current frame.
    pub(crate) fn control(&mut self, proximity: &[f64]) -> ControlSignal {
        match self {
            Controller::Fixed(signal) => *signal,
            Controller::Input(input) => input.latest(),
            Controller::Policy(policy) => policy.decide(proximity),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn dummy_always_drives_forward() {
        let mut controller = Controller::dummy();
        for _ in 0..3 {
            assert_eq!(controller.control(&[]), ControlSignal::FORWARD);
        }
    }

    #[test]
    fn input_channels_persist_until_released() {
        let mut input = InputController::new();
        input.push(InputEvent::press(Button::Forward));
        input.push(InputEvent::press(Button::Left));
        assert_eq!(
            input.latest(),
            ControlSignal {
                forward: true,
                left: true,
                ..ControlSignal::NONE
            }
        );

        // No new events: the signal holds.
        assert!(input.latest().forward);

        input.push(InputEvent::release(Button::Left));
        let signal = input.latest();
        assert!(signal.forward && !signal.left);
    }

    #[test]
    fn press_and_release_in_one_frame_cancel() {
        let mut input = InputController::new();
        input.push(InputEvent::press(Button::Reverse));
        input.push(InputEvent::release(Button::Reverse));
        assert_eq!(input.latest(), ControlSignal::NONE);
    }

    #[test]
    fn closure_policies_receive_the_proximity_vector() {
        let mut controller = Controller::policy(|proximity: &[f64]| ControlSignal {
            right: proximity[0] > proximity[1],
            ..ControlSignal::FORWARD
        });
        let signal = controller.control(&[0.8, 0.1]);
        assert!(signal.forward && signal.right);
        let signal = controller.control(&[0.1, 0.8]);
        assert!(signal.forward && !signal.right);
    }
}
