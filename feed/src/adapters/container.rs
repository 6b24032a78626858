//! Render targets
//!
//! `Container` keeps the fragments in memory; `HtmlFileTarget` also writes
//! them out as a standalone page after every cycle.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::domain::RenderTarget;
use crate::error::FeedError;

/// In-memory container, fully replaced every cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    fragments: Vec<String>,
}

/// Container shared between the poll task and its observers
pub type SharedContainer = Arc<Mutex<Container>>;

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedContainer {
        Arc::new(Mutex::new(Self::new()))
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Rendered content, fragments joined by newlines
    pub fn html(&self) -> String {
        self.fragments.join("\n")
    }
}

impl RenderTarget for Container {
    fn clear(&mut self) {
        self.fragments.clear();
    }

    fn append(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }
}

/// Wrap container content in a complete HTML document
pub fn render_page(content: &str) -> String {
    let mut buf = String::new();

    buf.push_str("<!DOCTYPE html>\n");
    buf.push_str("<html lang=\"en\">\n");
    buf.push_str("<head>\n");
    buf.push_str("<meta charset=\"utf-8\">\n");
    buf.push_str("<title>Repository Events</title>\n");
    buf.push_str("</head>\n");
    buf.push_str("<body>\n");
    buf.push_str("<h1>Repository Events</h1>\n");
    buf.push_str("<div id=\"events-log\">\n");
    if !content.is_empty() {
        buf.push_str(content);
        buf.push('\n');
    }
    buf.push_str("</div>\n");
    buf.push_str("</body>\n");
    buf.push_str("</html>\n");

    buf
}

/// Container that writes itself to an HTML file on commit
#[derive(Debug)]
pub struct HtmlFileTarget {
    path: PathBuf,
    container: Container,
}

impl HtmlFileTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            container: Container::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "events.html".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl RenderTarget for HtmlFileTarget {
    fn clear(&mut self) {
        self.container.clear();
    }

    fn append(&mut self, fragment: String) {
        self.container.append(fragment);
    }

    /// Replace the page in one rename so readers never see half a file
    fn commit(&mut self) -> Result<(), FeedError> {
        let page = render_page(&self.container.html());
        let tmp = self.temp_path();

        fs::write(&tmp, page)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), "Wrote events page");
        Ok(())
    }
}
