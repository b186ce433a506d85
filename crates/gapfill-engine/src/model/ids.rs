//! Typed handles into a [`Quiz`](super::Quiz)'s entity tables.
//!
//! A handle is an index plus the identity of the quiz that issued it. Entities
//! are never moved or freed, so a handle stays valid for the quiz's lifetime.
//! Passing a handle to a different quiz is a contract violation and panics.

use uuid::Uuid;

/// Identity of one loaded quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuizId(Uuid);

impl QuizId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            pub(crate) quiz: QuizId,
            pub(crate) index: usize,
        }

        impl $name {
            pub(crate) fn new(quiz: QuizId, index: usize) -> Self {
                Self { quiz, index }
            }

            /// Position in the quiz's table, starting at 0.
            pub fn index(&self) -> usize {
                self.index
            }

            /// The quiz this handle belongs to.
            pub fn quiz(&self) -> QuizId {
                self.quiz
            }
        }
    };
}

entity_id!(
    /// Handle to a task.
    TaskId
);
entity_id!(
    /// Handle to a gap.
    GapId
);
entity_id!(
    /// Handle to a phrase.
    PhraseId
);
