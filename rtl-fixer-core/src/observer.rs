//! Re-running the fixer whenever the host page changes.
//!
//! [`Session`] bundles the document, the configuration and the toggle
//! controller. [`start`] runs one pass and subscribes a handler to a
//! [`ChangeNotifier`] that runs a pass per change batch.
use std::cell::RefCell;
use std::rc::Rc;

use crate::config::FixerConfig;
use crate::dom::DocumentTree;
use crate::mode::Mode;
use crate::scanner::{ScanReport, scan};
use crate::toggle::{InjectOutcome, ToggleController, Transition};

/// Source of "the document changed" notifications.
pub trait ChangeNotifier {
    type Error: std::error::Error + 'static;

    /// Register `handler` to run once per batch of changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying source cannot be observed.
    fn subscribe(&mut self, handler: Box<dyn FnMut()>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport<N> {
    pub scan: ScanReport,
    pub button: InjectOutcome<N>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// Passes run, including the one that confirmed nothing changed.
    pub passes: usize,
    pub converged: bool,
}

pub struct Session<D: DocumentTree> {
    doc: D,
    config: FixerConfig,
    controller: ToggleController,
    passes: u64,
}

pub type SharedSession<D> = Rc<RefCell<Session<D>>>;

impl<D: DocumentTree> Session<D> {
    #[must_use]
    pub fn new(doc: D, config: FixerConfig) -> Self {
        let controller = ToggleController::new(config.initial_mode);
        Self {
            doc,
            config,
            controller,
            passes: 0,
        }
    }

    #[must_use]
    pub fn into_shared(self) -> SharedSession<D> {
        Rc::new(RefCell::new(self))
    }

    #[must_use]
    pub const fn doc(&self) -> &D {
        &self.doc
    }

    pub const fn doc_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    #[must_use]
    pub const fn config(&self) -> &FixerConfig {
        &self.config
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Passes run since the session was created.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Scan content, then make sure the toggle button exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn run_pass(&mut self) -> Result<PassReport<D::Node>, D::Error> {
        self.passes += 1;
        let scan = scan(&mut self.doc, &self.config, self.controller.mode())?;
        let button = self.controller.ensure_button(&mut self.doc, &self.config)?;
        Ok(PassReport { scan, button })
    }

    /// Like [`Session::run_pass`] but logs failures instead of returning them.
    pub fn run_pass_logged(&mut self) {
        if let Err(err) = self.run_pass() {
            log::error!("fixer pass failed: {err}");
        }
    }

    /// Handle a click on the toggle button.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn click(&mut self) -> Result<Transition, D::Error> {
        self.controller.click(&mut self.doc, &self.config)
    }

    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn finish_animation(&mut self) -> Result<(), D::Error> {
        ToggleController::finish_animation(&mut self.doc, &self.config)
    }

    /// Run passes until one leaves the document unchanged, at most `max_passes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document rejects a query or a write.
    pub fn settle(&mut self, max_passes: usize) -> Result<Settled, D::Error> {
        let mut before = self.doc.fingerprint()?;
        for pass in 1..=max_passes {
            self.run_pass()?;
            let after = self.doc.fingerprint()?;
            if after == before {
                return Ok(Settled {
                    passes: pass,
                    converged: true,
                });
            }
            before = after;
        }
        log::warn!("document still changing after {max_passes} passes");
        Ok(Settled {
            passes: max_passes,
            converged: false,
        })
    }
}

/// Run the first pass and re-run on every change batch from `notifier`.
///
/// # Errors
///
/// Returns an error if the notifier refuses the subscription.
pub fn start<D, N>(session: &SharedSession<D>, notifier: &mut N) -> Result<(), N::Error>
where
    D: DocumentTree + 'static,
    N: ChangeNotifier,
{
    session.borrow_mut().run_pass_logged();
    let session = Rc::clone(session);
    notifier.subscribe(Box::new(move || {
        if let Ok(mut session) = session.try_borrow_mut() {
            session.run_pass_logged();
        } else {
            log::trace!("change notification during an active pass, skipped");
        }
    }))
}

/// Notifier driven by hand, for tests and offline runs.
#[derive(Default)]
pub struct ManualNotifier {
    handlers: Vec<Box<dyn FnMut()>>,
}

impl ManualNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one change batch; returns how many handlers ran.
    pub fn notify(&mut self) -> usize {
        for handler in &mut self.handlers {
            handler();
        }
        self.handlers.len()
    }

    #[must_use]
    pub fn subscribers(&self) -> usize {
        self.handlers.len()
    }
}

impl ChangeNotifier for ManualNotifier {
    type Error = std::convert::Infallible;

    fn subscribe(&mut self, handler: Box<dyn FnMut()>) -> Result<(), Self::Error> {
        self.handlers.push(handler);
        Ok(())
    }
}
