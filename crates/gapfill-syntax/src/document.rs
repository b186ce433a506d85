//! Parse output: the document tree handed to the quiz model.

use serde::Serialize;

/// A gap placeholder as written in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedGap {
    /// Value of the `img` attribute, unresolved.
    pub img: Option<String>,
    /// The correct answer text.
    pub answer: String,
}

/// One element of a task's content, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskElement {
    Text(String),
    Gap(ParsedGap),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedTask {
    pub content: Vec<TaskElement>,
    /// Distractor phrases from `<extra>` tags.
    pub extra: Vec<String>,
}

impl ParsedTask {
    pub fn gaps(&self) -> impl Iterator<Item = &ParsedGap> {
        self.content.iter().filter_map(|element| match element {
            TaskElement::Gap(gap) => Some(gap),
            TaskElement::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub tasks: Vec<ParsedTask>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
