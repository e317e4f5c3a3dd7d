//! Toolbar toggle: owns the display mode and the button that cycles it
use serde::Serialize;

use crate::config::FixerConfig;
use crate::dom::DocumentTree;
use crate::mode::Mode;
use crate::scanner::{ScanReport, scan};

/// Visual state of the toggle button for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonView {
    pub label: &'static str,
    pub title: &'static str,
    pub active: bool,
    pub justify_icon: bool,
}

impl ButtonView {
    #[must_use]
    pub const fn for_mode(mode: Mode) -> Self {
        Self {
            label: mode.label(),
            title: mode.title(),
            active: mode.is_enabled(),
            justify_icon: matches!(mode, Mode::Justify),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome<N> {
    /// The toolbar anchor is not in the page yet.
    AnchorMissing,
    /// Anchor found but it has no parent to host the button.
    Detached,
    /// The anchor's parent already hosts the button.
    AlreadyPresent,
    /// A new button was inserted.
    Injected(N),
}

impl<N> InjectOutcome<N> {
    #[must_use]
    pub const fn injected(&self) -> bool {
        matches!(self, Self::Injected(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// Whether the animation class was added; the caller removes it after
    /// `animation_ms` through [`ToggleController::finish_animation`].
    pub animate: bool,
    pub scan: ScanReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleController {
    mode: Mode,
}

impl Default for ToggleController {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl ToggleController {
    #[must_use]
    pub const fn new(initial: Mode) -> Self {
        Self { mode: initial }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Insert the toggle button next to the toolbar anchor unless it is already there.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn ensure_button<D: DocumentTree>(
        &self,
        doc: &mut D,
        config: &FixerConfig,
    ) -> Result<InjectOutcome<D::Node>, D::Error> {
        let Some(anchor) = doc.query_first(&config.toolbar_anchor_selector)? else {
            log::trace!("toolbar anchor not found, deferring button injection");
            return Ok(InjectOutcome::AnchorMissing);
        };
        let Some(parent) = doc.parent(&anchor) else {
            return Ok(InjectOutcome::Detached);
        };
        let button_selector = format!("#{}", config.ids.button);
        if !doc.query_within(&parent, &button_selector)?.is_empty() {
            return Ok(InjectOutcome::AlreadyPresent);
        }

        let button = doc.create_button(&config.ids.button)?;
        render_button(doc, &button, config, self.mode)?;
        doc.append_child(&parent, &button)?;
        log::info!("toggle button injected (mode {})", self.mode);
        Ok(InjectOutcome::Injected(button))
    }

    /// Advance the mode, redraw the button and rescan the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn click<D: DocumentTree>(
        &mut self,
        doc: &mut D,
        config: &FixerConfig,
    ) -> Result<Transition, D::Error> {
        let from = self.mode;
        let to = from.next();
        self.mode = to;

        let button = doc.query_first(&format!("#{}", config.ids.button))?;
        if let Some(button) = &button {
            render_button(doc, button, config, to)?;
        }
        let scan = scan(doc, config, to)?;

        let animate = from == Mode::Off && button.is_some();
        if let (true, Some(button)) = (animate, &button) {
            doc.add_class(button, &config.classes.button_animate)?;
        }
        log::info!("mode {from} -> {to}");
        Ok(Transition {
            from,
            to,
            animate,
            scan,
        })
    }

    /// Drop the transient animation class from the button, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn finish_animation<D: DocumentTree>(
        doc: &mut D,
        config: &FixerConfig,
    ) -> Result<(), D::Error> {
        if let Some(button) = doc.query_first(&format!("#{}", config.ids.button))? {
            doc.remove_class(&button, &config.classes.button_animate)?;
        }
        Ok(())
    }
}

/// Bring the button's caption and classes in line with `mode`.
///
/// # Errors
///
/// Returns an error if the document rejects a write.
pub fn render_button<D: DocumentTree>(
    doc: &mut D,
    button: &D::Node,
    config: &FixerConfig,
    mode: Mode,
) -> Result<(), D::Error> {
    let view = ButtonView::for_mode(mode);
    doc.set_text(button, view.label)?;
    doc.set_attribute(button, "title", view.title)?;
    doc.set_attribute(button, "aria-pressed", if view.active { "true" } else { "false" })?;
    doc.toggle_class(button, &config.classes.button_active, view.active)?;
    doc.toggle_class(button, &config.classes.button_justify_icon, view.justify_icon)
}
