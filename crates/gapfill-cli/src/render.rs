//! Plain-text rendering of a quiz.
//!
//! Gaps print as `[____]` while empty and `[words]` once filled; a trailing
//! `*` marks a gap that has an image.

use gapfill_engine::{GapRef, Quiz, TaskRef, TextItem};
use std::io::{self, Write};

pub fn write_quiz(quiz: &Quiz, out: &mut impl Write) -> io::Result<()> {
    for task in quiz.tasks() {
        write_task(task, out)?;
    }
    writeln!(
        out,
        "Total: {} correct, {} wrong, {} gaps",
        quiz.correct_answers(),
        quiz.wrong_answers(),
        quiz.total_gaps()
    )
}

fn write_task(task: TaskRef<'_>, out: &mut impl Write) -> io::Result<()> {
    let finished = if task.is_finished() { ", finished" } else { "" };
    writeln!(
        out,
        "Task {} ({} gaps{finished})",
        task.index() + 1,
        task.gap_count()
    )?;

    let line: Vec<String> = task
        .text()
        .map(|item| match item {
            TextItem::Word(word) => word.to_string(),
            TextItem::Gap(gap) => gap_label(gap),
        })
        .collect();
    writeln!(out, "  {}", line.join(" "))?;

    let choices: Vec<String> = task.choices().map(|p| p.words().join(" ")).collect();
    if choices.is_empty() {
        writeln!(out, "  choices: (none)")?;
    } else {
        writeln!(out, "  choices: {}", choices.join(" | "))?;
    }

    if task.is_finished() {
        writeln!(
            out,
            "  score: {} correct, {} wrong",
            task.correct_answers(),
            task.wrong_answers()
        )?;
    }
    Ok(())
}

fn gap_label(gap: GapRef<'_>) -> String {
    let fill = match gap.phrase() {
        Some(phrase) => phrase.words().join(" "),
        None => "____".to_string(),
    };
    let image = if gap.has_image() { "*" } else { "" };
    format!("[{fill}]{image}")
}

/// Put every gap's own answer into it and finish every task.
pub fn fill_answers(quiz: &mut Quiz) {
    let tasks: Vec<_> = quiz.tasks().map(|t| t.id()).collect();

    for &task in &tasks {
        quiz.switch_task(task);
        if quiz.task(task).is_finished() {
            quiz.reset();
        }

        let gaps: Vec<_> = quiz.task(task).gaps().map(|g| g.id()).collect();
        for gap in gaps {
            let answer = quiz.gap(gap).answer_words();
            let phrase = quiz
                .task(task)
                .choices()
                .find(|p| p.words() == answer)
                .map(|p| p.id());
            if let Some(phrase) = phrase {
                quiz.insert(phrase, gap);
            }
        }
        quiz.finish();
    }

    if let Some(&first) = tasks.first() {
        quiz.switch_task(first);
    }
}
