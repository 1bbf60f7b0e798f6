use std::path::Path;

pub const MASTER_PASSWORD_FILE: &str = "master-password.txt";

/// Read the master password used by the secret-sequence autofill.
///
/// The file is optional; a missing or empty file simply disables the
/// easter egg.
pub fn load(base_dir: &Path) -> Option<String> {
    let path = base_dir.join(MASTER_PASSWORD_FILE);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let trimmed = content.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(err) => {
            tracing::debug!("master password file not readable: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{load, MASTER_PASSWORD_FILE};

    #[test]
    fn trims_trailing_newline() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(MASTER_PASSWORD_FILE), "hunter2\n").expect("write");
        assert_eq!(load(dir.path()).as_deref(), Some("hunter2"));
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load(dir.path()).is_none());
    }
}
