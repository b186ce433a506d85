//! # Quiz Model
//!
//! Live state of a loaded exercise set: which phrase fills which gap, which
//! phrases are still in each task's choice pool, and which tasks are finished.
//!
//! ## Entity tables
//!
//! The model owns three parallel tables linked by integer indices:
//!
//! - **tasks**: finished flag, the task's gaps, its current choice pool and
//!   the original text layout (words interleaved with gaps)
//! - **phrases**: words, owning task, and the gap it occupies (if any)
//! - **gaps**: owning task, optional image, answer words, and the phrase
//!   occupying it (if any)
//!
//! All three are filled once by [`Quiz::load`] and never shrink, so the typed
//! handles ([`TaskId`], [`GapId`], [`PhraseId`]) stay valid for the model's
//! lifetime.
//!
//! ## Invariants
//!
//! After every mutation:
//!
//! 1. every phrase is either in its task's choice pool or in exactly one gap
//! 2. `gaps[g].phrase == Some(p)` iff `phrases[p].gap == Some(g)`
//! 3. a phrase only ever occupies a gap of its own task
//! 4. a finished task rejects insert, remove and swap
//!
//! The occupancy fields are crate-private; [`Quiz::insert`], [`Quiz::remove`] and
//! [`Quiz::swap`] are the only code that writes them and each updates both
//! sides of the link.
//!
//! ## Contract violations
//!
//! Handles from another quiz, mutations of finished tasks and the other
//! documented preconditions are caller bugs. They panic.

pub mod ids;
mod load;
mod views;

pub use ids::{GapId, PhraseId, QuizId, TaskId};
pub use load::{LoadWarning, Loaded};
pub use views::{GapRef, PhraseRef, TaskRef, TextItem};

use crate::images::GapImage;

#[derive(Debug, Clone)]
pub(crate) enum TextSlot {
    Word(String),
    Gap(usize),
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TaskEntry {
    pub(crate) finished: bool,
    pub(crate) gaps: Vec<usize>,
    pub(crate) choices: Vec<usize>,
    pub(crate) text: Vec<TextSlot>,
}

#[derive(Debug, Clone)]
pub(crate) struct PhraseEntry {
    pub(crate) words: Vec<String>,
    pub(crate) task: usize,
    pub(crate) gap: Option<usize>,
}

impl PhraseEntry {
    /// Case-insensitive ordering key for the choice pool.
    fn sort_key(&self) -> String {
        self.words.join(" ").to_lowercase()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GapEntry {
    pub(crate) task: usize,
    pub(crate) image: Option<GapImage>,
    pub(crate) answer: Vec<String>,
    pub(crate) phrase: Option<usize>,
}

/// A loaded exercise set and the learner's progress through it.
///
/// A clone is an independent quiz with its own [`QuizId`]: handles taken
/// from one copy are rejected by the other.
#[derive(Debug)]
pub struct Quiz {
    id: QuizId,
    pub(crate) tasks: Vec<TaskEntry>,
    pub(crate) phrases: Vec<PhraseEntry>,
    pub(crate) gaps: Vec<GapEntry>,
    current: usize,
}

impl Clone for Quiz {
    fn clone(&self) -> Self {
        Self {
            id: QuizId::new(),
            tasks: self.tasks.clone(),
            phrases: self.phrases.clone(),
            gaps: self.gaps.clone(),
            current: self.current,
        }
    }
}

impl Quiz {
    pub(crate) fn empty() -> Self {
        Self {
            id: QuizId::new(),
            tasks: Vec::new(),
            phrases: Vec::new(),
            gaps: Vec::new(),
            current: 0,
        }
    }

    pub fn id(&self) -> QuizId {
        self.id
    }

    // === Queries ===

    pub fn tasks(&self) -> impl ExactSizeIterator<Item = TaskRef<'_>> {
        (0..self.tasks.len()).map(move |index| TaskRef::new(self, index))
    }

    pub fn task(&self, id: TaskId) -> TaskRef<'_> {
        self.assert_owns(id.quiz, "task");
        TaskRef::new(self, id.index)
    }

    pub fn gap(&self, id: GapId) -> GapRef<'_> {
        self.assert_owns(id.quiz, "gap");
        GapRef::new(self, id.index)
    }

    pub fn phrase(&self, id: PhraseId) -> PhraseRef<'_> {
        self.assert_owns(id.quiz, "phrase");
        PhraseRef::new(self, id.index)
    }

    /// The task the learner is working on, `None` for a quiz without tasks.
    pub fn current_task(&self) -> Option<TaskRef<'_>> {
        (self.current < self.tasks.len()).then(|| TaskRef::new(self, self.current))
    }

    pub fn has_next_task(&self) -> bool {
        self.current + 1 < self.tasks.len()
    }

    /// Correct answers over finished tasks only.
    pub fn correct_answers(&self) -> usize {
        self.finished_tasks().map(|t| t.correct_answers()).sum()
    }

    /// Wrong or empty answers over finished tasks only.
    pub fn wrong_answers(&self) -> usize {
        self.finished_tasks().map(|t| t.wrong_answers()).sum()
    }

    pub fn total_gaps(&self) -> usize {
        self.gaps.len()
    }

    fn finished_tasks(&self) -> impl Iterator<Item = TaskRef<'_>> {
        self.tasks().filter(|t| t.is_finished())
    }

    pub(crate) fn task_id(&self, index: usize) -> TaskId {
        TaskId::new(self.id, index)
    }

    pub(crate) fn gap_id(&self, index: usize) -> GapId {
        GapId::new(self.id, index)
    }

    pub(crate) fn phrase_id(&self, index: usize) -> PhraseId {
        PhraseId::new(self.id, index)
    }

    pub(crate) fn gap_is_correct(&self, gap: usize) -> bool {
        let entry = &self.gaps[gap];
        entry
            .phrase
            .is_some_and(|phrase| self.phrases[phrase].words == entry.answer)
    }

    // === Task cursor ===

    pub fn switch_task(&mut self, task: TaskId) {
        self.assert_owns(task.quiz, "task");
        self.current = task.index;
    }

    /// Move to the following task and return it.
    ///
    /// Panics when the current task is the last one.
    pub fn next_task(&mut self) -> TaskId {
        assert!(self.has_next_task(), "there is no task after the last one");
        self.current += 1;
        self.task_id(self.current)
    }

    // === Mutations ===

    /// Put a phrase from the choice pool into an empty gap of the same task.
    ///
    /// Returns the position the phrase had in the choice pool, so a caller
    /// can later put it back into the same slot with [`Quiz::remove`].
    pub fn insert(&mut self, phrase: PhraseId, gap: GapId) -> usize {
        self.assert_owns(phrase.quiz, "phrase");
        self.assert_owns(gap.quiz, "gap");

        let task = self.phrases[phrase.index].task;
        assert!(
            self.phrases[phrase.index].gap.is_none(),
            "phrase {} already fills a gap",
            phrase.index
        );
        assert!(
            self.gaps[gap.index].phrase.is_none(),
            "gap {} is already filled",
            gap.index
        );
        assert_eq!(
            task, self.gaps[gap.index].task,
            "phrase and gap belong to different tasks"
        );
        self.assert_unfinished(task);

        let choices = &mut self.tasks[task].choices;
        let Some(position) = choices.iter().position(|&p| p == phrase.index) else {
            panic!("phrase {} is missing from its choice pool", phrase.index);
        };
        choices.remove(position);

        self.phrases[phrase.index].gap = Some(gap.index);
        self.gaps[gap.index].phrase = Some(phrase.index);
        position
    }

    /// Take the phrase out of a filled gap and put it back into the choice
    /// pool before position `insert_before`.
    ///
    /// The pool is not re-sorted: pass the index returned by
    /// [`Quiz::insert`] to restore the phrase's old slot, or 0 for the front.
    pub fn remove(&mut self, gap: GapId, insert_before: usize) {
        self.assert_owns(gap.quiz, "gap");
        self.remove_at(gap.index, insert_before);
    }

    fn remove_at(&mut self, gap: usize, insert_before: usize) {
        let task = self.gaps[gap].task;
        let Some(phrase) = self.gaps[gap].phrase else {
            panic!("gap {gap} is empty");
        };
        self.assert_unfinished(task);

        let choices = &mut self.tasks[task].choices;
        assert!(
            insert_before <= choices.len(),
            "choice position {insert_before} is out of range (pool has {})",
            choices.len()
        );
        choices.insert(insert_before, phrase);

        self.gaps[gap].phrase = None;
        self.phrases[phrase].gap = None;
    }

    /// Exchange the phrases of two gaps of the same task. Either gap may be
    /// empty; swapping a gap with itself does nothing.
    pub fn swap(&mut self, a: GapId, b: GapId) {
        self.assert_owns(a.quiz, "gap");
        self.assert_owns(b.quiz, "gap");

        let task = self.gaps[a.index].task;
        assert_eq!(
            task, self.gaps[b.index].task,
            "gaps belong to different tasks"
        );
        self.assert_unfinished(task);

        if a.index == b.index {
            return;
        }

        let in_a = self.gaps[a.index].phrase;
        let in_b = self.gaps[b.index].phrase;
        self.gaps[a.index].phrase = in_b;
        self.gaps[b.index].phrase = in_a;
        if let Some(phrase) = in_a {
            self.phrases[phrase].gap = Some(b.index);
        }
        if let Some(phrase) = in_b {
            self.phrases[phrase].gap = Some(a.index);
        }
    }

    /// Mark the current task finished. Its score now counts towards the
    /// quiz totals and its gaps are frozen.
    pub fn finish(&mut self) {
        let current = self.current_index();
        self.tasks[current].finished = true;
    }

    /// Reopen the current task: empty every gap and restore the canonical
    /// choice order.
    pub fn reset(&mut self) {
        let current = self.current_index();
        self.tasks[current].finished = false;

        for gap in self.tasks[current].gaps.clone() {
            if self.gaps[gap].phrase.is_some() {
                self.remove_at(gap, 0);
            }
        }
        self.sort_choices(current);
    }

    /// Order the task's pool case-insensitively by joined words, breaking
    /// ties by load order.
    pub(crate) fn sort_choices(&mut self, task: usize) {
        let phrases = &self.phrases;
        self.tasks[task]
            .choices
            .sort_by_cached_key(|&p| (phrases[p].sort_key(), p));
    }

    fn current_index(&self) -> usize {
        assert!(self.current < self.tasks.len(), "quiz has no tasks");
        self.current
    }

    fn assert_owns(&self, quiz: QuizId, what: &str) {
        assert_eq!(quiz, self.id, "{what} handle belongs to a different quiz");
    }

    fn assert_unfinished(&self, task: usize) {
        assert!(
            !self.tasks[task].finished,
            "task {task} is finished and cannot be changed"
        );
    }

    /// Check the occupancy invariants. Used by tests after every mutation.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        for (index, phrase) in self.phrases.iter().enumerate() {
            let pooled = self.tasks[phrase.task]
                .choices
                .iter()
                .filter(|&&p| p == index)
                .count();
            match phrase.gap {
                Some(gap) => {
                    assert_eq!(pooled, 0, "phrase {index} is in a gap and the pool");
                    assert_eq!(self.gaps[gap].phrase, Some(index));
                    assert_eq!(self.gaps[gap].task, phrase.task);
                }
                None => assert_eq!(pooled, 1, "phrase {index} is nowhere"),
            }
        }
        for (index, gap) in self.gaps.iter().enumerate() {
            if let Some(phrase) = gap.phrase {
                assert_eq!(self.phrases[phrase].gap, Some(index));
            }
        }
    }
}
