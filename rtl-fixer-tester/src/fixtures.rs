//! Synthetic article pages shaped like the host platform's markup
use rtl_fixer_core::{MemoryDocument, NodeId};

pub struct ArticlePage {
    pub doc: MemoryDocument,
    pub toolbar: Option<NodeId>,
    pub header: NodeId,
    pub avatar: NodeId,
    pub arabic_paragraph: NodeId,
    pub latin_paragraph: NodeId,
    pub wrapped_paragraph: NodeId,
    pub list: NodeId,
}

/// A mixed-language article, optionally with the toolbar anchor present.
pub fn article_page(with_toolbar: bool) -> ArticlePage {
    let mut doc = MemoryDocument::new();
    let body = doc.body();

    let toolbar = with_toolbar.then(|| {
        let toolbar = doc.append_element(body, "div");
        doc.with_attribute(toolbar, "class", "js-postActionsBar");
        let anchor = doc.append_element(toolbar, "button");
        doc.with_attribute(anchor, "aria-label", "responses");
        doc.append_text(anchor, "12");
        toolbar
    });

    let article = doc.append_element(body, "article");
    let header = doc.append_element(article, "header");
    doc.append_text(header, "بقلم كاتب");
    let avatar = doc.append_element(header, "img");
    doc.with_attribute(avatar, "class", "avatar");
    let follow = doc.append_element(header, "span");
    doc.with_attribute(follow, "class", "followState");

    let content = doc.append_element(article, "div");
    doc.with_attribute(content, "class", "postArticle-content");
    let section = doc.append_element(content, "section");
    doc.with_attribute(section, "class", "eh");
    doc.append_with_text(section, "h1", "مقدمة");
    let arabic_paragraph = doc.append_with_text(section, "p", "Hello مرحبا world");
    let latin_paragraph = doc.append_element(section, "p");
    doc.append_text(latin_paragraph, "Plain English with ");
    doc.append_with_text(latin_paragraph, "a", "a link");
    let wrapped_paragraph = doc.append_element(section, "p");
    doc.append_text(wrapped_paragraph, "Quote: ");
    doc.append_with_text(wrapped_paragraph, "strong", "نص عريض");
    let list = doc.append_element(section, "ol");
    doc.append_with_text(list, "li", "الخطوة الأولى");
    doc.append_with_text(list, "li", "second step");
    doc.append_with_text(section, "blockquote", "اقتباس");

    ArticlePage {
        doc,
        toolbar,
        header,
        avatar,
        arabic_paragraph,
        latin_paragraph,
        wrapped_paragraph,
        list,
    }
}

/// Add the toolbar anchor to a page that was built without it.
pub fn add_toolbar(doc: &mut MemoryDocument) -> NodeId {
    let body = doc.body();
    let toolbar = doc.append_element(body, "div");
    let anchor = doc.append_element(toolbar, "button");
    doc.with_attribute(anchor, "aria-label", "responses");
    toolbar
}
