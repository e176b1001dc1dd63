//! Quadrature state machine.
//!
//! The two phase levels `(A, B)` form one of four Gray-coded states. Clockwise
//! rotation walks them in the order `00 → 01 → 11 → 10 → 00`; counter-clockwise
//! walks the same ring backwards. A jump to the opposite corner of the ring (both
//! bits changing at once) means an edge was missed or the lines are noisy, and
//! carries no direction information.

use crate::motion::Direction;

/// One of the four quadrature states, named `(A, B)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum QuadratureState {
    /// A low, B low.
    S00 = 0,
    /// A low, B high.
    S01 = 1,
    /// A high, B high.
    S11 = 2,
    /// A high, B low.
    S10 = 3,
}

/// Classification of a move between two quadrature states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// No state change (spurious interrupt or complement-only edge).
    Idle,
    /// One step forward along the canonical sequence.
    Clockwise,
    /// One step backward along the canonical sequence.
    CounterClockwise,
    /// Both phases changed at once. Direction unknown.
    Invalid,
}

use Transition::{Clockwise as Cw, CounterClockwise as Ccw, Idle, Invalid};

/// `TRANSITIONS[from][to]`, indexed by the state discriminants.
const TRANSITIONS: [[Transition; 4]; 4] = [
    //  to: 00       01       11       10
    [Idle, Cw, Invalid, Ccw],  // from 00
    [Ccw, Idle, Cw, Invalid],  // from 01
    [Invalid, Ccw, Idle, Cw],  // from 11
    [Cw, Invalid, Ccw, Idle],  // from 10
];

impl QuadratureState {
    /// All states in clockwise order, starting at `00`.
    pub const SEQUENCE: [QuadratureState; 4] = [
        QuadratureState::S00,
        QuadratureState::S01,
        QuadratureState::S11,
        QuadratureState::S10,
    ];

    /// State for the given phase levels (`true` = high).
    #[inline]
    pub const fn from_levels(a: bool, b: bool) -> Self {
        match (a, b) {
            (false, false) => QuadratureState::S00,
            (false, true) => QuadratureState::S01,
            (true, true) => QuadratureState::S11,
            (true, false) => QuadratureState::S10,
        }
    }

    /// Phase levels `(A, B)` of this state.
    #[inline]
    pub const fn levels(self) -> (bool, bool) {
        match self {
            QuadratureState::S00 => (false, false),
            QuadratureState::S01 => (false, true),
            QuadratureState::S11 => (true, true),
            QuadratureState::S10 => (true, false),
        }
    }

    /// Classify the move from `self` to `next`.
    #[inline]
    pub const fn transition(self, next: QuadratureState) -> Transition {
        TRANSITIONS[self as usize][next as usize]
    }

    /// Neighbouring state one step in `direction`.
    #[inline]
    pub const fn step(self, direction: Direction) -> Self {
        let offset = match direction {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => 3,
        };
        Self::SEQUENCE[(self as usize + offset) % 4]
    }
}

impl Transition {
    /// Direction carried by this transition, if any.
    #[inline]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Transition::Clockwise => Some(Direction::Clockwise),
            Transition::CounterClockwise => Some(Direction::CounterClockwise),
            Transition::Idle | Transition::Invalid => None,
        }
    }

    /// Whether this transition counts as a tick.
    #[inline]
    pub const fn is_tick(self) -> bool {
        matches!(self, Transition::Clockwise | Transition::CounterClockwise)
    }
}
