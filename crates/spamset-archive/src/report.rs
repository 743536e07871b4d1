use std::path::PathBuf;

/// Summary of one extraction run.
#[derive(Clone, Debug, Default)]
pub struct ArchiveReport {
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ExtractedEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub size: u64,
    pub is_directory: bool,
}

impl ArchiveReport {
    pub(crate) fn push(&mut self, entry: ExtractedEntry) {
        self.total_bytes += entry.size;
        self.entries.push(entry);
        self.entry_count = self.entries.len();
    }

    /// Extracted regular files, directories excluded.
    pub fn files(&self) -> impl Iterator<Item = &ExtractedEntry> {
        self.entries.iter().filter(|e| !e.is_directory)
    }
}
