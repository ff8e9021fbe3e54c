use std::path::{Path, PathBuf};

pub const LISTS_FILE_NAME: &str = "lists.json";
pub const TASKS_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root: PathBuf,
    pub lists_file: PathBuf,
    pub tasks_file: PathBuf,
}

impl DataPaths {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            lists_file: root.join(LISTS_FILE_NAME),
            tasks_file: root.join(TASKS_FILE_NAME),
        }
    }
}
