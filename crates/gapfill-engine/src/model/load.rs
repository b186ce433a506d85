//! Building a [`Quiz`] from a parsed [`Document`].

use gapfill_syntax::{Document, ParsedTask, TaskElement};
use relative_path::RelativePath;

use super::{GapEntry, PhraseEntry, Quiz, TaskEntry, TextSlot};
use crate::images::{GapImage, ImageError, ImageResolver};

/// A problem found while loading that did not stop the load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadWarning {
    /// `task` is the 0-based task index; the message numbers tasks from 1.
    #[error("task {}, gap \"{answer}\": {source}", .task + 1)]
    Image {
        task: usize,
        answer: String,
        source: ImageError,
    },
}

/// A ready-to-use quiz plus whatever went wrong along the way.
#[derive(Debug)]
pub struct Loaded {
    pub quiz: Quiz,
    pub warnings: Vec<LoadWarning>,
}

fn to_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_string)
}

impl Quiz {
    /// Build the entity tables for every task of `document`. Choice pools
    /// start sorted and every gap starts empty.
    pub fn load(document: &Document, images: &impl ImageResolver) -> Loaded {
        let mut quiz = Quiz::empty();
        let mut warnings = Vec::new();

        for parsed in &document.tasks {
            quiz.load_task(parsed, images, &mut warnings);
        }
        for task in 0..quiz.tasks.len() {
            quiz.sort_choices(task);
        }

        log::debug!(
            "loaded quiz with {} task(s), {} gap(s), {} phrase(s)",
            quiz.tasks.len(),
            quiz.gaps.len(),
            quiz.phrases.len()
        );
        Loaded { quiz, warnings }
    }

    fn load_task(
        &mut self,
        parsed: &ParsedTask,
        images: &impl ImageResolver,
        warnings: &mut Vec<LoadWarning>,
    ) {
        let task = self.tasks.len();
        let mut entry = TaskEntry::default();

        for element in &parsed.content {
            match element {
                TaskElement::Text(text) => entry.text.extend(to_words(text).map(TextSlot::Word)),
                TaskElement::Gap(gap) => {
                    let answer: Vec<String> = to_words(&gap.answer).collect();
                    let image = gap
                        .img
                        .as_deref()
                        .filter(|img| !img.is_empty())
                        .and_then(|img| match images.resolve(RelativePath::new(img)) {
                            Ok(image) => Some(image),
                            Err(source) => {
                                log::warn!("gap \"{}\" in task {}: {source}", gap.answer, task + 1);
                                warnings.push(LoadWarning::Image {
                                    task,
                                    answer: gap.answer.clone(),
                                    source,
                                });
                                None
                            }
                        });

                    let index = self.push_gap(task, image, answer.clone());
                    entry.gaps.push(index);
                    entry.text.push(TextSlot::Gap(index));
                    entry.choices.push(self.push_phrase(task, answer));
                }
            }
        }

        for extra in &parsed.extra {
            entry
                .choices
                .push(self.push_phrase(task, to_words(extra).collect()));
        }

        self.tasks.push(entry);
    }

    fn push_gap(&mut self, task: usize, image: Option<GapImage>, answer: Vec<String>) -> usize {
        self.gaps.push(GapEntry {
            task,
            image,
            answer,
            phrase: None,
        });
        self.gaps.len() - 1
    }

    fn push_phrase(&mut self, task: usize, words: Vec<String>) -> usize {
        self.phrases.push(PhraseEntry {
            words,
            task,
            gap: None,
        });
        self.phrases.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::load_quiz;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn choices(quiz: &Quiz, task: usize) -> Vec<String> {
        quiz.tasks()
            .nth(task)
            .unwrap()
            .choices()
            .map(|p| p.words().join(" "))
            .collect()
    }

    #[test]
    fn pool_holds_answers_and_extras_sorted() {
        let quiz = load_quiz(
            "<task><gap>Zebra</gap> <gap>apple pie</gap><extra>Banana</extra><extra>apple</extra></task>",
        );
        let task = quiz.current_task().unwrap();
        assert_eq!(task.gap_count(), 2);
        assert_eq!(task.choice_count(), 4);
        assert!(task.gaps().all(|g| g.is_empty()));
        assert_eq!(
            choices(&quiz, 0),
            vec!["apple", "apple pie", "Banana", "Zebra"]
        );
    }

    #[test]
    fn equal_keys_keep_load_order() {
        let quiz = load_quiz("<task><gap>Cat</gap><extra>cat</extra><extra>CAT</extra></task>");
        assert_eq!(choices(&quiz, 0), vec!["Cat", "cat", "CAT"]);
    }

    #[test]
    fn each_task_owns_its_pool() {
        let quiz = load_quiz(
            "<task><gap>one</gap></task><task><gap>two</gap><extra>three</extra></task>",
        );
        assert_eq!(quiz.tasks().len(), 2);
        assert_eq!(choices(&quiz, 0), vec!["one"]);
        assert_eq!(choices(&quiz, 1), vec!["three", "two"]);
        assert_eq!(quiz.total_gaps(), 2);
    }

    #[test]
    fn answers_are_split_into_words() {
        let quiz = load_quiz("<task><gap>  a   lot\nof </gap></task>");
        let gap = quiz.current_task().unwrap().gaps().next().unwrap();
        assert_eq!(gap.answer_words(), ["a", "lot", "of"]);
    }

    #[test]
    fn resolved_images_are_attached() {
        let document = gapfill_syntax::parse(
            r#"<task><gap img="cat.png">cat</gap><gap img="">dog</gap><gap>fish</gap></task>"#,
        )
        .unwrap();
        let resolver = |img: &RelativePath| -> Result<GapImage, ImageError> {
            Ok(GapImage::new(img.to_path("/pictures")))
        };

        let loaded = Quiz::load(&document, &resolver);
        assert!(loaded.warnings.is_empty());

        let task = loaded.quiz.current_task().unwrap();
        let images: Vec<_> = task
            .gaps()
            .map(|g| g.image().map(|i| i.path().to_path_buf()))
            .collect();
        assert_eq!(
            images,
            vec![Some(Path::new("/pictures/cat.png").to_path_buf()), None, None]
        );
    }

    #[test]
    fn unresolvable_image_is_a_warning() {
        let document =
            gapfill_syntax::parse(r#"<task><gap img="gone.png">cat</gap></task>"#).unwrap();
        let resolver = |img: &RelativePath| -> Result<GapImage, ImageError> {
            Err(ImageError::NotFound(img.to_path("")))
        };

        let loaded = Quiz::load(&document, &resolver);
        assert_eq!(
            loaded.warnings,
            vec![LoadWarning::Image {
                task: 0,
                answer: "cat".to_string(),
                source: ImageError::NotFound("gone.png".into()),
            }]
        );
        assert_eq!(
            loaded.warnings[0].to_string(),
            "task 1, gap \"cat\": Image not found: gone.png"
        );

        let gap = loaded.quiz.current_task().unwrap().gaps().next().unwrap();
        assert!(!gap.has_image());
    }
}
