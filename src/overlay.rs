use crate::core::SceneStats;
use web_sys as web;

const HINT_ID: &str = "hint-overlay";

/// Hidden means either the `hidden` class or an inline `display:none`.
fn is_hidden(el: &web::Element) -> bool {
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .is_some_and(|s| s.contains("display:none"))
}

fn set_visible(el: &web::Element, visible: bool) {
    let classes = el.class_list();
    if visible {
        _ = classes.remove_1("hidden");
        _ = el.remove_attribute("style");
    } else {
        _ = classes.add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

/// Flip the hint overlay between shown and hidden. Returns the new visibility.
pub fn toggle(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(HINT_ID) else {
        return false;
    };
    let visible = is_hidden(&el);
    set_visible(&el, visible);
    visible
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

/// Rewrite the hint line with the current modes and the last statistics.
pub fn update_hint(
    document: &web::Document,
    knots: usize,
    flicker: bool,
    wireframe: bool,
    stats: Option<SceneStats>,
) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let stats_text = stats.map(|s| format!(" • {}", s)).unwrap_or_default();
        let hint_html = format!(
            "<div style='color: #f3e6ee; font: 13px system-ui; background: rgba(20, 12, 18, 0.8); padding: 8px 12px; border-radius: 6px; border: 1px solid rgba(255, 105, 180, 0.35);'>Shift+click: spawn • drag: scale • F: flicker ({}) • W: wireframe ({}) • H: hide • knots: {}{}</div>",
            on_off(flicker),
            on_off(wireframe),
            knots,
            stats_text
        );
        el.set_inner_html(&hint_html);
    }
}
