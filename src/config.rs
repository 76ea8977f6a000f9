use std::path::{Path, PathBuf};

/// User-facing load options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub delimiter: u8,                  // field separator, '|' for the posts export
    pub max_load_errors: u64,           // abort the load once exceeded
    pub error_log: Option<PathBuf>,     // if None, derive `<input>.errors.tsv`
    pub progress: bool,                 // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,  // BufReader capacity
    pub write_buffer_bytes: usize, // BufWriter capacity
}

impl Default for LoadOptions {
    fn default() -> Self {
        // Buffer defaults chosen to be safe but noticeably faster than std defaults.
        let default_read = 256 * 1024;
        let default_write = 256 * 1024;

        Self {
            delimiter: b'|',
            max_load_errors: 100,
            error_log: None,
            progress: true,
            progress_label: None,

            read_buffer_bytes: default_read,
            write_buffer_bytes: default_write,
        }
    }
}

impl LoadOptions {
    pub fn with_delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }
    pub fn with_max_load_errors(mut self, n: u64) -> Self {
        self.max_load_errors = n;
        self
    }
    pub fn with_error_log(mut self, path: impl AsRef<Path>) -> Self {
        self.error_log = Some(path.as_ref().to_path_buf());
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }

    // IO buffers tuning
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
}
