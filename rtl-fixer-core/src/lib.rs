//! RTL Fixer core
//!
//! Platform-agnostic logic for detecting Arabic content on article pages and
//! applying right-to-left styling. This crate has no browser dependencies;
//! the web build supplies a [`DocumentTree`] over the live DOM and a
//! [`ChangeNotifier`] over `MutationObserver`.

pub mod arabic;
pub mod config;
pub mod dom;
pub mod memory;
pub mod mode;
pub mod observer;
pub mod scanner;
pub mod selector;
pub mod style;
pub mod toggle;

// Re-export commonly used types
pub use arabic::contains_arabic;
pub use config::{ClassNames, ConfigError, ElementIds, FixerConfig};
pub use dom::DocumentTree;
pub use memory::{ElementRef, MemoryDocument, MemoryError, NodeId};
pub use mode::Mode;
pub use observer::{
    ChangeNotifier, ManualNotifier, PassReport, Session, Settled, SharedSession, start,
};
pub use scanner::{DIR_ATTRIBUTE, DIR_AUTO, HOST_DIR_ATTRIBUTE, ScanReport, scan};
pub use selector::{FixerSelectors, SelectorError, SelectorList};
pub use style::stylesheet;
pub use toggle::{ButtonView, InjectOutcome, ToggleController, Transition, render_button};
