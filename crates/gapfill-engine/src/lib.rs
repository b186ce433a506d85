//! # gapfill-engine
//!
//! The quiz model behind fill-in-the-gap exercises: load a parsed
//! [`Document`](gapfill_syntax::Document) into a [`Quiz`], then move phrases
//! between the choice pool and the gaps and score the result.
//!
//! ```
//! use gapfill_engine::{GapImage, ImageError, load_str};
//! use relative_path::RelativePath;
//!
//! let no_images = |img: &RelativePath| -> Result<GapImage, ImageError> {
//!     Err(ImageError::NotFound(img.to_path("")))
//! };
//! let mut quiz = load_str("<task><gap>red</gap> apple</task>", &no_images)
//!     .unwrap()
//!     .quiz;
//!
//! let task = quiz.current_task().unwrap();
//! let gap = task.gaps().next().unwrap().id();
//! let red = task.choices().next().unwrap().id();
//!
//! quiz.insert(red, gap);
//! quiz.finish();
//! assert_eq!(quiz.correct_answers(), 1);
//! ```

pub mod images;
pub mod io;
pub mod model;


pub use images::{DirImageResolver, GapImage, ImageError, ImageResolver};
pub use io::LoadError;
pub use model::{
    GapId, GapRef, LoadWarning, Loaded, PhraseId, PhraseRef, Quiz, QuizId, TaskId, TaskRef,
    TextItem,
};

use gapfill_syntax::ParseError;

/// Parse markup and load it into a fresh quiz.
///
/// Syntax errors abort the load; unresolvable images only add warnings.
pub fn load_str(source: &str, images: &impl ImageResolver) -> Result<Loaded, ParseError> {
    let document = gapfill_syntax::parse(source)?;
    Ok(Quiz::load(&document, images))
}
