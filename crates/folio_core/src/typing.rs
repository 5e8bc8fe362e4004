//! # Typing Animator
//!
//! Types out each role string one character at a time, holds it, deletes
//! it, and moves on to the next, forever.
//!
//! ## States
//!
//! - **Typing**: every tick reveals one more character.
//! - **Deleting**: every tick hides one character.
//!
//! ```text
//!            cursor == len            cursor == 0
//!  Typing ──────────────────► Deleting ──────────────► Typing (next role)
//!           pause word_pause           pause next_word_pause
//! ```
//!
//! There is no paused state. A pause is just a longer delay before the
//! next tick, returned by [`TypingAnimator::tick`].

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::TypingConfig;
use crate::schedule::Scheduler;
use crate::surface::{ElementId, Surface};

/// Direction of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Revealing characters.
    #[default]
    Typing,
    /// Hiding characters.
    Deleting,
}

/// Position of the animator within the role sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatorState {
    /// Index of the role being shown.
    pub index: usize,
    /// Number of characters currently shown.
    pub cursor: usize,
    /// Current direction.
    pub phase: Phase,
}

/// Delays between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    /// After revealing one character.
    pub type_delay: Duration,
    /// After hiding one character.
    pub delete_delay: Duration,
    /// After a word is complete.
    pub word_pause: Duration,
    /// After a word is fully deleted.
    pub next_word_pause: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self::from(&TypingConfig::default())
    }
}

impl From<&TypingConfig> for TypingTimings {
    fn from(config: &TypingConfig) -> Self {
        Self {
            type_delay: config.type_delay(),
            delete_delay: config.delete_delay(),
            word_pause: config.word_pause(),
            next_word_pause: config.next_word_pause(),
        }
    }
}

/// The typing/deleting state machine.
#[derive(Debug, Clone)]
pub struct TypingAnimator {
    /// Roles with their character boundaries precomputed.
    roles: Vec<Role>,
    state: AnimatorState,
    timings: TypingTimings,
}

#[derive(Debug, Clone)]
struct Role {
    text: String,
    /// Byte offset of every character boundary, `[0, .., text.len()]`.
    boundaries: Vec<usize>,
}

impl Role {
    fn new(text: String) -> Self {
        let boundaries = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, boundaries }
    }

    fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn prefix(&self, chars: usize) -> &str {
        &self.text[..self.boundaries[chars]]
    }
}

impl TypingAnimator {
    /// Creates an animator over `roles`.
    ///
    /// Empty strings are skipped. Returns `None` if nothing is left to type.
    #[must_use]
    pub fn new<I, S>(roles: I, timings: TypingTimings) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<Role> = roles
            .into_iter()
            .map(Into::into)
            .filter(|role: &String| !role.is_empty())
            .map(Role::new)
            .collect();

        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            state: AnimatorState::default(),
            timings,
        })
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.state
    }

    /// Returns the number of roles in the sequence.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Returns the text currently shown.
    #[must_use]
    pub fn rendered(&self) -> &str {
        self.roles[self.state.index].prefix(self.state.cursor)
    }

    /// Advances by one character and returns the delay before the next tick.
    pub fn tick(&mut self) -> Duration {
        let len = self.roles[self.state.index].char_len();

        match self.state.phase {
            Phase::Typing => {
                self.state.cursor = (self.state.cursor + 1).min(len);
                if self.state.cursor == len {
                    self.state.phase = Phase::Deleting;
                    tracing::trace!(index = self.state.index, "role typed");
                    return self.timings.word_pause;
                }
                self.timings.type_delay
            }
            Phase::Deleting => {
                self.state.cursor = self.state.cursor.saturating_sub(1);
                if self.state.cursor == 0 {
                    self.state.phase = Phase::Typing;
                    self.state.index = (self.state.index + 1) % self.roles.len();
                    tracing::trace!(index = self.state.index, "advancing to next role");
                    return self.timings.next_word_pause;
                }
                self.timings.delete_delay
            }
        }
    }
}

/// Drives a [`TypingAnimator`] against the page with a [`Scheduler`].
///
/// Each step renders, then schedules the following step after the delay
/// the animator asked for. Steps therefore never overlap.
pub struct TypingLoop {
    animator: RefCell<TypingAnimator>,
    target: ElementId,
    surface: Rc<dyn Surface>,
    scheduler: Rc<dyn Scheduler>,
}

impl TypingLoop {
    /// Starts the loop. The first tick runs immediately.
    ///
    /// The returned handle is only needed for inspection; the loop keeps
    /// itself alive through the scheduler.
    pub fn start(
        animator: TypingAnimator,
        target: ElementId,
        surface: Rc<dyn Surface>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Rc<Self> {
        tracing::debug!(roles = animator.role_count(), element = %target, "typing loop started");
        let this = Rc::new(Self {
            animator: RefCell::new(animator),
            target,
            surface,
            scheduler,
        });
        Self::step(&this);
        this
    }

    /// Returns the animator state.
    #[must_use]
    pub fn state(&self) -> AnimatorState {
        self.animator.borrow().state()
    }

    fn step(this: &Rc<Self>) {
        let delay = {
            let mut animator = this.animator.borrow_mut();
            let delay = animator.tick();
            this.surface.set_text(this.target, animator.rendered());
            delay
        };

        let next = Rc::clone(this);
        this.scheduler
            .schedule(delay, Box::new(move || Self::step(&next)));
    }
}
