use anyhow::{Context, Result, ensure};
use rtl_fixer_core::{
    DIR_ATTRIBUTE, DIR_AUTO, DocumentTree, InjectOutcome, ManualNotifier, MemoryDocument, Mode,
    NodeId, Session, ToggleController, scan, start,
};

use super::ScenarioCtx;
use crate::fixtures::{add_toolbar, article_page};

fn fixer_marks(ctx: &ScenarioCtx<'_>, doc: &MemoryDocument) -> Result<usize> {
    let classes = &ctx.config.classes;
    let mut count = doc.select(&format!("[{DIR_ATTRIBUTE}]"))?.len();
    for class in classes
        .content_classes()
        .into_iter()
        .chain([classes.header_fix.as_str()])
    {
        count += doc.select(&format!(".{class}"))?.len();
    }
    Ok(count)
}

fn styled_with(ctx: &ScenarioCtx<'_>, doc: &MemoryDocument, node: NodeId, mode: Mode) -> bool {
    let classes = &ctx.config.classes;
    let base = doc.get_attribute(node, DIR_ATTRIBUTE) == Some(DIR_AUTO)
        && doc.element_has_class(node, &classes.fixed_text);
    match mode.alignment_class(classes) {
        Some(alignment) => base && doc.element_has_class(node, alignment),
        None => false,
    }
}

pub fn paragraph_walkthrough(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let classes = &ctx.config.classes;
    let mut doc = MemoryDocument::new();
    let p = doc.append_with_text(doc.body(), "p", "Hello مرحبا world");

    scan(&mut doc, ctx.config, Mode::RightAlign)?;
    ensure!(
        styled_with(ctx, &doc, p, Mode::RightAlign),
        "right-align pass left {}",
        doc.render()
    );

    scan(&mut doc, ctx.config, Mode::Justify)?;
    ensure!(
        styled_with(ctx, &doc, p, Mode::Justify),
        "justify pass left {}",
        doc.render()
    );
    ensure!(
        !doc.element_has_class(p, &classes.align_right),
        "right-align class survived the switch to justify"
    );

    scan(&mut doc, ctx.config, Mode::Off)?;
    ensure!(
        doc.get_attribute(p, DIR_ATTRIBUTE).is_none() && doc.classes(p).is_empty(),
        "off pass left {}",
        doc.render()
    );
    Ok(())
}

pub fn scan_idempotence(ctx: &ScenarioCtx<'_>) -> Result<()> {
    for mode in Mode::ALL {
        let mut once = article_page(true).doc;
        scan(&mut once, ctx.config, mode)?;
        let mut twice = article_page(true).doc;
        scan(&mut twice, ctx.config, mode)?;
        scan(&mut twice, ctx.config, mode)?;
        ensure!(
            once.fingerprint()? == twice.fingerprint()?,
            "second {mode} scan changed the document"
        );
    }
    Ok(())
}

pub fn mode_cycle(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut doc = article_page(true).doc;
    let mut controller = ToggleController::new(Mode::RightAlign);
    controller.ensure_button(&mut doc, ctx.config)?;
    let mut seen = Vec::new();
    for _ in 0..3 {
        seen.push(controller.click(&mut doc, ctx.config)?.to);
    }
    ensure!(
        seen == [Mode::Justify, Mode::Off, Mode::RightAlign],
        "unexpected cycle {seen:?}"
    );
    Ok(())
}

pub fn detection_precision(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = article_page(true);
    let mut doc = page.doc;
    scan(&mut doc, ctx.config, Mode::RightAlign)?;
    ensure!(
        styled_with(ctx, &doc, page.arabic_paragraph, Mode::RightAlign),
        "direct Arabic text was not styled"
    );
    ensure!(
        !doc.element_has_class(page.latin_paragraph, &ctx.config.classes.fixed_text),
        "Latin paragraph was styled"
    );
    ensure!(
        !doc.element_has_class(page.wrapped_paragraph, &ctx.config.classes.fixed_text),
        "paragraph with only wrapped Arabic was styled"
    );
    ensure!(
        !doc.element_has_class(page.list, &ctx.config.classes.fixed_text),
        "list without direct text was styled"
    );
    Ok(())
}

pub fn off_clears_state(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut doc = article_page(true).doc;
    scan(&mut doc, ctx.config, Mode::Justify)?;
    ensure!(fixer_marks(ctx, &doc)? > 0, "nothing was styled");
    scan(&mut doc, ctx.config, Mode::Off)?;
    let left = fixer_marks(ctx, &doc)?;
    ensure!(left == 0, "{left} fixer marks survived the off pass");
    Ok(())
}

pub fn single_button(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = article_page(true);
    let toolbar = page.toolbar.context("fixture has no toolbar")?;
    let shared = Session::new(page.doc, ctx.config.clone()).into_shared();
    let mut notifier = ManualNotifier::new();
    start(&shared, &mut notifier)?;
    for _ in 0..ctx.max_passes.max(3) {
        notifier.notify();
    }
    let session = shared.borrow();
    let buttons = session.doc().select(&format!("#{}", ctx.config.ids.button))?;
    ensure!(buttons.len() == 1, "{} toggle buttons found", buttons.len());
    ensure!(
        session.doc().parent_of(buttons[0]) == Some(toolbar),
        "button is not in the toolbar"
    );
    Ok(())
}

pub fn observer_convergence(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut session = Session::new(article_page(true).doc, ctx.config.clone());
    let settled = session.settle(ctx.max_passes)?;
    ensure!(settled.converged, "initial passes did not converge");
    ensure!(
        settled.passes <= 2,
        "initial convergence took {} passes",
        settled.passes
    );
    for _ in 0..3 {
        session.click()?;
        let settled = session.settle(ctx.max_passes)?;
        ensure!(
            settled.converged && settled.passes == 1,
            "pass after {} click changed the document",
            session.mode()
        );
    }
    Ok(())
}

pub fn header_fix(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let page = article_page(true);
    let mut doc = page.doc;
    let report = scan(&mut doc, ctx.config, Mode::RightAlign)?;
    ensure!(
        styled_with(ctx, &doc, page.header, Mode::RightAlign),
        "Arabic header was not styled"
    );
    ensure!(
        report.header_fixes > 0
            && doc.element_has_class(page.avatar, &ctx.config.classes.header_fix),
        "header avatar did not receive the margin fix"
    );
    scan(&mut doc, ctx.config, Mode::Off)?;
    ensure!(
        !doc.element_has_class(page.avatar, &ctx.config.classes.header_fix),
        "header fix survived the off pass"
    );
    Ok(())
}

pub fn missing_anchor(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let mut session = Session::new(article_page(false).doc, ctx.config.clone());
    let first = session.run_pass()?;
    ensure!(
        first.button == InjectOutcome::AnchorMissing,
        "expected the injection to defer, got {:?}",
        first.button
    );
    ensure!(first.scan.styled > 0, "content was not styled without toolbar");

    add_toolbar(session.doc_mut());
    let second = session.run_pass()?;
    ensure!(second.button.injected(), "late toolbar was not picked up");
    if ctx.verbose {
        println!("    passes run: {}", session.passes());
    }
    Ok(())
}
