use crate::images::DirImageResolver;
use crate::model::{Loaded, Quiz};
use gapfill_syntax::ParseError;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of exercise files.
pub const EXERCISE_EXTENSION: &str = "ltf";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("Invalid exercises directory: {0}")]
    InvalidExercisesDir(String),
}

/// Parse an exercise file into a quiz, resolving gap images relative to the
/// file's own directory.
pub fn load_file(path: &Path) -> Result<Loaded, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    let document = gapfill_syntax::parse(&source).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let base = path.parent().unwrap_or(Path::new(""));
    log::debug!("loading {} with images from {}", path.display(), base.display());
    Ok(Quiz::load(&document, &DirImageResolver::new(base)))
}

/// Scan for exercise files in the exercises directory
pub fn scan_exercise_files(exercises_root: &Path) -> Result<Vec<PathBuf>, LoadError> {
    if !exercises_root.exists() {
        return Err(LoadError::InvalidExercisesDir(
            "exercises directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(exercises_root, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(LoadError::Io)?;

    for entry in entries {
        let entry = entry.map_err(LoadError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == EXERCISE_EXTENSION
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_exercises_dir(path: &Path) -> Result<(), LoadError> {
    if !path.exists() || !path.is_dir() {
        return Err(LoadError::InvalidExercisesDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LoadWarning;
    use crate::tests::{create_test_dir, create_test_file};
    use gapfill_syntax::LexError;

    #[test]
    fn test_scan_exercise_files() {
        // Given a directory with exercise files
        let dir = create_test_dir();
        create_test_file(&dir, "b.ltf", "<task><gap>x</gap></task>");
        create_test_file(&dir, "a.ltf", "<task><gap>y</gap></task>");

        // When scanning for files
        let files = scan_exercise_files(dir.path()).unwrap();

        // Then both are found, sorted
        let names: Vec<_> = files.iter().map(|f| f.file_name().unwrap()).collect();
        assert_eq!(names, vec!["a.ltf", "b.ltf"]);
    }

    #[test]
    fn test_scan_nested_directories_and_skip_other_files() {
        let dir = create_test_dir();
        create_test_file(&dir, "root.ltf", "");
        create_test_file(&dir, "cat.png", "fake image data");
        create_test_file(&dir, "notes.txt", "<task></task>");

        let sub_dir = dir.path().join("unit2");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("nested.ltf"), "").unwrap();

        let files = scan_exercise_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.file_name().unwrap() == "root.ltf"));
        assert!(files.iter().any(|f| f.file_name().unwrap() == "nested.ltf"));
    }

    #[test]
    fn test_handle_invalid_exercises_directory() {
        let result = scan_exercise_files(Path::new("/this/path/does/not/exist"));
        assert!(result.unwrap_err().to_string().contains("exercises directory"));
    }

    #[test]
    fn test_validate_exercises_dir() {
        let dir = create_test_dir();
        assert!(validate_exercises_dir(dir.path()).is_ok());

        let file = create_test_file(&dir, "a.ltf", "");
        assert!(matches!(
            validate_exercises_dir(&file),
            Err(LoadError::InvalidExercisesDir(_))
        ));
    }

    #[test]
    fn test_load_file_resolves_images_next_to_file() {
        // Given an exercise file with one present and one missing image
        let dir = create_test_dir();
        let image = create_test_file(&dir, "cat.png", "fake image data");
        let file = create_test_file(
            &dir,
            "animals.ltf",
            r#"<task><gap img="cat.png">cat</gap> <gap img="dog.png">dog</gap></task>"#,
        );

        // When loading it
        let loaded = load_file(&file).unwrap();

        // Then the present image is attached and the missing one is a warning
        let task = loaded.quiz.current_task().unwrap();
        let gaps: Vec<_> = task.gaps().collect();
        assert_eq!(gaps[0].image().unwrap().path(), image.as_path());
        assert!(!gaps[1].has_image());
        assert!(matches!(
            loaded.warnings.as_slice(),
            [LoadWarning::Image { answer, .. }] if answer == "dog"
        ));
    }

    #[test]
    fn test_load_file_reports_path_with_syntax_error() {
        let dir = create_test_dir();
        let file = create_test_file(&dir, "broken.ltf", "<task>&nbsp;</task>");

        let err = load_file(&file).unwrap_err();
        assert!(matches!(
            &err,
            LoadError::Parse { source: ParseError::Lex(LexError::InvalidEntity(name)), .. }
                if name == "nbsp"
        ));
        let message = err.to_string();
        assert!(message.contains("broken.ltf"));
        assert!(message.contains("invalid entity"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = create_test_dir();
        let result = load_file(&dir.path().join("missing.ltf"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }
}
