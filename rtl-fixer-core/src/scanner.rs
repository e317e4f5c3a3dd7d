//! Content scanner: detects Arabic content elements and (re)applies RTL styling
use serde::Serialize;

use crate::arabic::any_contains_arabic;
use crate::config::FixerConfig;
use crate::dom::DocumentTree;
use crate::mode::Mode;

/// Attribute written on every styled element.
pub const DIR_ATTRIBUTE: &str = "dir";
/// Value of [`DIR_ATTRIBUTE`] on styled elements.
pub const DIR_AUTO: &str = "auto";
/// Holds a host-authored [`DIR_ATTRIBUTE`] value while the fixer overrides it.
pub const HOST_DIR_ATTRIBUTE: &str = "data-rtl-fixer-dir";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub mode: Mode,
    /// Elements matched by the content selector list.
    pub matched: usize,
    /// Elements that received RTL styling.
    pub styled: usize,
    /// Header descendants that received the header fix.
    pub header_fixes: usize,
}

/// Re-evaluate every content element for `mode`.
///
/// Every call first strips what a previous call applied, so the result only
/// depends on `mode` and the current document.
///
/// # Errors
///
/// Returns an error only when the document rejects a query or a write.
pub fn scan<D: DocumentTree>(
    doc: &mut D,
    config: &FixerConfig,
    mode: Mode,
) -> Result<ScanReport, D::Error> {
    reset(doc, config)?;
    let elements = doc.query_all(&config.content_selector())?;

    let mut report = ScanReport {
        mode,
        matched: elements.len(),
        styled: 0,
        header_fixes: 0,
    };
    let Some(alignment) = mode.alignment_class(&config.classes) else {
        log::debug!("scan: mode off, cleared {} elements", report.matched);
        return Ok(report);
    };

    for element in &elements {
        if !any_contains_arabic(doc.direct_text(element)) {
            continue;
        }
        if let Some(host_dir) = doc.attribute(element, DIR_ATTRIBUTE) {
            doc.set_attribute(element, HOST_DIR_ATTRIBUTE, &host_dir)?;
        }
        doc.set_attribute(element, DIR_ATTRIBUTE, DIR_AUTO)?;
        doc.add_class(element, &config.classes.fixed_text)?;
        doc.add_class(element, alignment)?;
        report.styled += 1;

        if doc.tag_name(element) == "header" && !config.header_fix_selector.trim().is_empty() {
            for target in doc.query_within(element, &config.header_fix_selector)? {
                doc.add_class(&target, &config.classes.header_fix)?;
                report.header_fixes += 1;
            }
        }
    }

    log::debug!(
        "scan: mode {mode}, {} of {} elements styled",
        report.styled,
        report.matched
    );
    Ok(report)
}

/// Undo a previous scan wherever its classes are found, matched or not.
fn reset<D: DocumentTree>(doc: &mut D, config: &FixerConfig) -> Result<(), D::Error> {
    let classes = config.classes.content_classes();
    let marked = classes
        .iter()
        .map(|class| format!(".{class}"))
        .collect::<Vec<_>>()
        .join(", ");
    for element in doc.query_all(&marked)? {
        if doc.has_class(&element, &config.classes.fixed_text) {
            restore_direction(doc, &element)?;
        }
        for class in classes {
            doc.remove_class(&element, class)?;
        }
    }
    let header_fix = &config.classes.header_fix;
    for target in doc.query_all(&format!(".{header_fix}"))? {
        doc.remove_class(&target, header_fix)?;
    }
    Ok(())
}

fn restore_direction<D: DocumentTree>(doc: &mut D, element: &D::Node) -> Result<(), D::Error> {
    match doc.attribute(element, HOST_DIR_ATTRIBUTE) {
        Some(host_dir) => {
            doc.set_attribute(element, DIR_ATTRIBUTE, &host_dir)?;
            doc.remove_attribute(element, HOST_DIR_ATTRIBUTE)
        }
        None => doc.remove_attribute(element, DIR_ATTRIBUTE),
    }
}
