use vitrine_gallery::{DetailOverlay, DetailRecord};

/// Detail overlay for the desktop viewer.
///
/// The "overlay" is the window title plus an Enter-to-open action. The card
/// texture is already resident, so the image is acknowledged as loaded as soon
/// as the overlay is shown.
#[derive(Debug)]
pub struct TitleOverlay {
    base_title: String,
    detail: Option<DetailRecord>,
    interactive: bool,
    pending_ack: bool,
    title_dirty: bool,
}

impl TitleOverlay {
    pub fn new(base_title: impl Into<String>) -> Self {
        Self {
            base_title: base_title.into(),
            detail: None,
            interactive: false,
            pending_ack: false,
            title_dirty: false,
        }
    }

    /// True once after `show`; the host forwards it to the gallery.
    pub fn take_image_ack(&mut self) -> bool {
        std::mem::take(&mut self.pending_ack)
    }

    /// The window title, if it changed since the last call.
    pub fn take_title(&mut self) -> Option<String> {
        if !std::mem::take(&mut self.title_dirty) {
            return None;
        }
        Some(match &self.detail {
            Some(d) => format!("{} · {}", d.title, self.base_title),
            None => self.base_title.clone(),
        })
    }

    /// Detail to open on Enter; only while interactive.
    pub fn active_detail(&self) -> Option<&DetailRecord> {
        self.detail.as_ref().filter(|_| self.interactive)
    }
}

impl DetailOverlay for TitleOverlay {
    fn show(&mut self, detail: &DetailRecord, image_url: &str) {
        log::info!("overlay: {} ({image_url})", detail.title);
        self.detail = Some(detail.clone());
        self.interactive = false;
        self.pending_ack = true;
        self.title_dirty = true;
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    fn hide(&mut self) {
        if self.detail.take().is_some() {
            self.title_dirty = true;
        }
        self.interactive = false;
        self.pending_ack = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DetailRecord {
        DetailRecord {
            project_id: "harbour".into(),
            slug: "harbour".into(),
            title: "Harbour".into(),
            url: "/work/harbour".into(),
        }
    }

    #[test]
    fn show_acks_once_and_retitles() {
        let mut o = TitleOverlay::new("vitrine");
        o.show(&record(), "harbour/1.jpg");
        assert!(o.take_image_ack());
        assert!(!o.take_image_ack());
        assert_eq!(o.take_title().as_deref(), Some("Harbour · vitrine"));
        assert_eq!(o.take_title(), None);
    }

    #[test]
    fn detail_opens_only_while_interactive() {
        let mut o = TitleOverlay::new("vitrine");
        o.show(&record(), "harbour/1.jpg");
        assert!(o.active_detail().is_none());
        o.set_interactive(true);
        assert_eq!(o.active_detail().map(|d| d.url.as_str()), Some("/work/harbour"));
    }

    #[test]
    fn hide_restores_title() {
        let mut o = TitleOverlay::new("vitrine");
        o.show(&record(), "harbour/1.jpg");
        o.take_title();
        o.hide();
        assert_eq!(o.take_title().as_deref(), Some("vitrine"));
        assert!(!o.take_image_ack());
    }
}
