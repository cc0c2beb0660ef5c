use crate::error::{FlashcardsError, Result};
use crate::models::{FlashcardEntry, DECK_HEADER};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Writes a deck to a temporary file beside the target and renames it into place,
/// so a failed run never leaves a truncated deck behind.
pub struct DeckWriter {
    path: PathBuf,
}

impl DeckWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Returns the number of bytes written.
    pub fn write(&self, entries: &[FlashcardEntry]) -> Result<u64> {
        let mut temp_file = self.create_temp_file()?;

        // Replacing a deck keeps its mode.
        if let Ok(existing) = fs::metadata(&self.path) {
            temp_file
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| self.write_error(e))?;
        }

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(temp_file.as_file_mut());

            writer.write_record(DECK_HEADER)?;
            for entry in entries {
                writer.write_record(entry.as_record())?;
            }
            writer.flush()?;
        }

        temp_file.as_file_mut().flush()?;
        temp_file.as_file().sync_all()?;
        let bytes_written = temp_file.as_file().metadata()?.len();

        temp_file
            .persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        Ok(bytes_written)
    }

    fn create_temp_file(&self) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(".flashcards");

        // A new deck gets the same mode `File::create` would give it: 0o666 less the umask.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        builder
            .tempfile_in(self.staging_dir())
            .map_err(|e| self.write_error(e))
    }

    fn staging_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn write_error(&self, error: std::io::Error) -> FlashcardsError {
        FlashcardsError::Write {
            path: self.path.display().to_string(),
            message: error.to_string(),
        }
    }
}
