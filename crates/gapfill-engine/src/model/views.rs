//! Borrowed, read-only views of quiz entities.
//!
//! Views are cheap `Copy` wrappers around a `&Quiz` and a table index. They
//! expose everything a front end needs to draw a task but never hand out the
//! occupancy fields for writing.

use super::{Quiz, TextSlot};
use crate::images::GapImage;
use crate::model::ids::{GapId, PhraseId, TaskId};

#[derive(Clone, Copy)]
pub struct TaskRef<'a> {
    quiz: &'a Quiz,
    index: usize,
}

/// One element of a task's text-with-gaps view.
#[derive(Clone, Copy)]
pub enum TextItem<'a> {
    Word(&'a str),
    Gap(GapRef<'a>),
}

impl<'a> TaskRef<'a> {
    pub(super) fn new(quiz: &'a Quiz, index: usize) -> Self {
        Self { quiz, index }
    }

    pub fn id(&self) -> TaskId {
        self.quiz.task_id(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.entry().finished
    }

    pub fn gap_count(&self) -> usize {
        self.entry().gaps.len()
    }

    pub fn choice_count(&self) -> usize {
        self.entry().choices.len()
    }

    /// Gaps filled with exactly their answer.
    pub fn correct_answers(&self) -> usize {
        self.entry()
            .gaps
            .iter()
            .filter(|&&gap| self.quiz.gap_is_correct(gap))
            .count()
    }

    /// Gaps that are empty or filled with the wrong phrase.
    pub fn wrong_answers(&self) -> usize {
        self.gap_count() - self.correct_answers()
    }

    /// Gaps in reading order.
    pub fn gaps(self) -> impl ExactSizeIterator<Item = GapRef<'a>> + 'a {
        let quiz = self.quiz;
        quiz.tasks[self.index]
            .gaps
            .iter()
            .map(move |&gap| GapRef::new(quiz, gap))
    }

    /// The choice pool in its current order.
    pub fn choices(self) -> impl ExactSizeIterator<Item = PhraseRef<'a>> + 'a {
        let quiz = self.quiz;
        quiz.tasks[self.index]
            .choices
            .iter()
            .map(move |&phrase| PhraseRef::new(quiz, phrase))
    }

    /// Words and gaps in the order they were written.
    pub fn text(self) -> impl Iterator<Item = TextItem<'a>> + 'a {
        let quiz = self.quiz;
        quiz.tasks[self.index].text.iter().map(move |slot| match slot {
            TextSlot::Word(word) => TextItem::Word(word.as_str()),
            TextSlot::Gap(gap) => TextItem::Gap(GapRef::new(quiz, *gap)),
        })
    }

    fn entry(&self) -> &'a super::TaskEntry {
        &self.quiz.tasks[self.index]
    }
}

#[derive(Clone, Copy)]
pub struct GapRef<'a> {
    quiz: &'a Quiz,
    index: usize,
}

impl<'a> GapRef<'a> {
    pub(super) fn new(quiz: &'a Quiz, index: usize) -> Self {
        Self { quiz, index }
    }

    pub fn id(&self) -> GapId {
        self.quiz.gap_id(self.index)
    }

    pub fn task(&self) -> TaskRef<'a> {
        TaskRef::new(self.quiz, self.entry().task)
    }

    pub fn answer_words(&self) -> &'a [String] {
        &self.entry().answer
    }

    pub fn image(&self) -> Option<&'a GapImage> {
        self.entry().image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.entry().image.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entry().phrase.is_none()
    }

    /// The phrase currently in this gap.
    pub fn phrase(&self) -> Option<PhraseRef<'a>> {
        self.entry()
            .phrase
            .map(|phrase| PhraseRef::new(self.quiz, phrase))
    }

    pub fn is_correct(&self) -> bool {
        self.quiz.gap_is_correct(self.index)
    }

    pub fn is_wrong(&self) -> bool {
        !self.is_correct()
    }

    fn entry(&self) -> &'a super::GapEntry {
        &self.quiz.gaps[self.index]
    }
}

#[derive(Clone, Copy)]
pub struct PhraseRef<'a> {
    quiz: &'a Quiz,
    index: usize,
}

impl<'a> PhraseRef<'a> {
    pub(super) fn new(quiz: &'a Quiz, index: usize) -> Self {
        Self { quiz, index }
    }

    pub fn id(&self) -> PhraseId {
        self.quiz.phrase_id(self.index)
    }

    pub fn task(&self) -> TaskRef<'a> {
        TaskRef::new(self.quiz, self.entry().task)
    }

    pub fn words(&self) -> &'a [String] {
        &self.entry().words
    }

    pub fn gap(&self) -> Option<GapRef<'a>> {
        self.entry().gap.map(|gap| GapRef::new(self.quiz, gap))
    }

    pub fn is_in_gap(&self) -> bool {
        self.entry().gap.is_some()
    }

    pub fn is_in_choices(&self) -> bool {
        !self.is_in_gap()
    }

    fn entry(&self) -> &'a super::PhraseEntry {
        &self.quiz.phrases[self.index]
    }
}

impl std::fmt::Debug for TaskRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRef")
            .field("index", &self.index)
            .field("finished", &self.is_finished())
            .finish()
    }
}

impl std::fmt::Debug for GapRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GapRef")
            .field("index", &self.index)
            .field("answer", &self.answer_words())
            .finish()
    }
}

impl std::fmt::Debug for PhraseRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhraseRef")
            .field("index", &self.index)
            .field("words", &self.words())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::load_quiz;
    use pretty_assertions::assert_eq;

    fn render(task: TaskRef<'_>) -> String {
        task.text()
            .map(|item| match item {
                TextItem::Word(word) => word.to_string(),
                TextItem::Gap(gap) => match gap.phrase() {
                    Some(phrase) => format!("[{}]", phrase.words().join(" ")),
                    None => "[___]".to_string(),
                },
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn text_view_reconstructs_layout() {
        let quiz = load_quiz(
            "<task>The  <gap>black cat</gap>\n sat on <gap>mat</gap>.</task>",
        );
        let task = quiz.current_task().unwrap();
        assert_eq!(render(task), "The [___] sat on [___] .");
    }

    #[test]
    fn text_view_follows_occupancy() {
        let mut quiz = load_quiz("<task>A <gap>red</gap> apple</task>");
        let task = quiz.current_task().unwrap();
        let gap = task.gaps().next().unwrap().id();
        let red = task.choices().next().unwrap().id();

        quiz.insert(red, gap);
        assert_eq!(render(quiz.current_task().unwrap()), "A [red] apple");
    }

    #[test]
    fn phrase_and_gap_views() {
        let mut quiz = load_quiz("<task><gap>two words</gap><extra>x</extra></task>");
        let task = quiz.current_task().unwrap();
        assert_eq!(task.gap_count(), 1);
        assert_eq!(task.choice_count(), 2);

        let gap = task.gaps().next().unwrap();
        assert_eq!(gap.answer_words(), ["two", "words"]);
        assert!(!gap.has_image());
        assert!(gap.is_empty());
        assert!(gap.is_wrong());

        let phrase = task.choices().find(|p| p.words().len() == 2).unwrap();
        assert!(phrase.is_in_choices());
        assert_eq!(phrase.task().index(), 0);

        let (gap, phrase) = (gap.id(), phrase.id());
        quiz.insert(phrase, gap);
        let phrase = quiz.phrase(phrase);
        assert!(phrase.is_in_gap());
        assert_eq!(phrase.gap().unwrap().id(), gap);
        assert!(quiz.gap(gap).is_correct());
        assert_eq!(quiz.gap(gap).task().choice_count(), 1);
    }
}
