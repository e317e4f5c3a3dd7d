//! Stylesheet injected once into the host page
use crate::config::FixerConfig;

/// Generate the fixer stylesheet for the configured class names.
///
/// Rules only take effect once the scanner or the toggle controller puts
/// the matching classes on elements.
#[must_use]
pub fn stylesheet(config: &FixerConfig) -> String {
    let c = &config.classes;
    let button = &config.ids.button;
    let font = font_stack(&config.font_family);
    format!(
        r#".{fixed} {{
    direction: rtl;
    unicode-bidi: plaintext;
    font-family: {font};
    line-height: 1.9;
}}
.{fixed}.{right} {{
    text-align: right;
}}
.{fixed}.{justify} {{
    text-align: justify;
    text-justify: inter-word;
}}
ol.{fixed}, ul.{fixed}, .{fixed} ol, .{fixed} ul {{
    direction: rtl;
    padding-right: 30px;
    padding-left: 0;
}}
.{header_fix} {{
    margin-right: 10px;
    margin-left: 10px;
}}
#{button} {{
    border: none;
    background: transparent;
    cursor: pointer;
    font-family: {font};
    font-size: 18px;
    opacity: 0.55;
    padding: 0 8px;
    transition: opacity 0.2s ease, transform 0.2s ease;
}}
#{button}.{active} {{
    opacity: 1;
}}
#{button}.{justify_icon} {{
    letter-spacing: 1px;
}}
#{button}.{animate} {{
    transform: scale(1.25);
}}
"#,
        fixed = c.fixed_text,
        right = c.align_right,
        justify = c.align_justify,
        header_fix = c.header_fix,
        active = c.button_active,
        justify_icon = c.button_justify_icon,
        animate = c.button_animate,
    )
}

fn font_stack(family: &str) -> String {
    let family = family.trim();
    if family.is_empty() || family == "sans-serif" {
        "sans-serif".to_string()
    } else {
        format!("\"{family}\", sans-serif")
    }
}
