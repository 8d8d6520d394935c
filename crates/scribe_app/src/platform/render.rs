use scribe_core::PageViewModel;

/// Prints the progress indicator to the terminal whenever its text changes.
#[derive(Debug, Default)]
pub struct TipRenderer {
    shown: Option<String>,
}

impl TipRenderer {
    /// Returns the line to print for `view`, if the indicator changed.
    pub fn render_line(&mut self, view: &PageViewModel) -> Option<String> {
        if view.tip == self.shown {
            return None;
        }
        self.shown = view.tip.clone();
        Some(match &view.tip {
            Some(text) => format!("[tip] {text}"),
            None => "[tip] -".to_string(),
        })
    }

    pub fn render(&mut self, view: &PageViewModel) {
        if let Some(line) = self.render_line(view) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use scribe_core::PageViewModel;

    use super::TipRenderer;

    fn view(tip: Option<&str>) -> PageViewModel {
        PageViewModel {
            tip: tip.map(str::to_string),
            ..PageViewModel::default()
        }
    }

    #[test]
    fn prints_only_changes() {
        let mut renderer = TipRenderer::default();
        assert_eq!(renderer.render_line(&view(None)), None);
        assert_eq!(
            renderer.render_line(&view(Some("uploading 1/2"))).as_deref(),
            Some("[tip] uploading 1/2")
        );
        assert_eq!(renderer.render_line(&view(Some("uploading 1/2"))), None);
        assert_eq!(
            renderer.render_line(&view(None)).as_deref(),
            Some("[tip] -")
        );
    }
}
