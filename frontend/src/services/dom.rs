//! Thin helpers over the page DOM that the widgets are mounted into.

use anyhow::{anyhow, Result};
use gloo::utils::{document, window};
use shared::{Rect, ScheduleQuery, ScheduleRow, UserFilter, UserFilterTab, WidgetConfig};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDocument, HtmlElement, NodeList};

use crate::services::logging::Logger;

const CONFIG_ELEMENT_ID: &str = "widget-config";

pub fn element_by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>> {
    let nodes: NodeList = root
        .query_selector_all(selector)
        .map_err(|e| anyhow!("invalid selector {}: {:?}", selector, e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn text_of(element: &Element) -> String {
    element.text_content().unwrap_or_default().trim().to_string()
}

/// Page configuration from `<script id="widget-config" type="application/json">`,
/// falling back to defaults
pub fn read_config() -> WidgetConfig {
    let Some(element) = element_by_id(CONFIG_ELEMENT_ID) else {
        return WidgetConfig::default();
    };
    match WidgetConfig::from_json(&text_of(&element)) {
        Ok(config) => config,
        Err(e) => {
            Logger::warn_with_component("config", &format!("Ignoring invalid widget config: {}", e));
            WidgetConfig::default()
        }
    }
}

/// Value of a cookie of the current document
pub fn cookie(name: &str) -> Option<String> {
    let html_document = document().dyn_into::<HtmlDocument>().ok()?;
    let cookies = html_document.cookie().ok()?;
    shared::status::cookie_value(&cookies, name)
}

/// Read the server-rendered schedule rows below `root`
pub fn read_schedule_rows(root: &Element) -> Result<Vec<ScheduleRow>> {
    let rows = query_all(root, "tr[data-department]")?;
    rows.iter()
        .map(|row| -> Result<ScheduleRow> {
            let attr = |name: &str| row.get_attribute(name).unwrap_or_default();
            let cells: Vec<String> = query_all(row, "td")?.iter().map(text_of).collect();
            let professor_id = row.get_attribute("data-professor-id").filter(|id| !id.is_empty());
            Ok(ScheduleRow::new(
                professor_id,
                attr("data-department"),
                attr("data-day"),
                &attr("data-search"),
                cells,
            ))
        })
        .collect()
}

/// API narrowing carried on the table root as `data-professor`, `data-department`, `data-day` and `data-timeslot`
pub fn read_schedule_query(root: &Element) -> ScheduleQuery {
    let attr = |name: &str| root.get_attribute(name).filter(|value| !value.trim().is_empty());
    ScheduleQuery {
        professor: attr("data-professor"),
        department: attr("data-department"),
        day: attr("data-day"),
        timeslot: attr("data-timeslot"),
    }
}

/// Read the filter tabs rendered below `root`
pub fn read_filter_tabs(root: &Element) -> Result<Vec<UserFilterTab>> {
    Ok(query_all(root, "[data-filter]")?
        .iter()
        .filter_map(|tab| {
            let filter = tab.get_attribute("data-filter")?;
            Some(UserFilterTab::new(&filter, &text_of(tab)))
        })
        .collect())
}

/// Show or hide every `.user-row` of the page according to `filter`
pub fn apply_user_filter(filter: &UserFilter) -> Result<usize> {
    let rows = query_all(&document().document_element().ok_or_else(|| anyhow!("no document element"))?, ".user-row")?;
    let mut shown = 0;
    for row in rows {
        let class_list = row.class_list();
        let classes: Vec<String> = (0..class_list.length()).filter_map(|i| class_list.item(i)).collect();
        let visible = filter.shows(classes.iter().map(String::as_str));
        if visible {
            shown += 1;
        }

        let row: HtmlElement = row
            .dyn_into()
            .map_err(|_| anyhow!("user row is not an HTML element"))?;
        row.style()
            .set_property("display", if visible { "" } else { "none" })
            .map_err(|e| anyhow!("failed to set row display: {:?}", e))?;
    }
    Ok(shown)
}

pub fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        left: rect.left(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn set_position(element: &Element, top: f64, left: f64) -> Result<()> {
    let element: &HtmlElement = element
        .dyn_ref()
        .ok_or_else(|| anyhow!("tooltip is not an HTML element"))?;
    let style = element.style();
    style
        .set_property("top", &format!("{}px", top))
        .and_then(|_| style.set_property("left", &format!("{}px", left)))
        .map_err(|e| anyhow!("failed to position element: {:?}", e))
}

/// Full-page navigation
pub fn navigate(path: &str) -> Result<()> {
    window()
        .location()
        .set_href(path)
        .map_err(|e| anyhow!("navigation to {} failed: {:?}", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_read_schedule_rows_from_markup() {
        let container = document().create_element("div").unwrap();
        container.set_inner_html(
            r#"<table><tbody>
                <tr class="schedule-row" data-professor-id="5" data-department="CCS" data-day="Monday" data-search="Santos CSIT104">
                    <td>Santos</td><td>CCS</td><td>09:00 AM - 10:30 AM</td><td>Monday</td>
                </tr>
                <tr class="schedule-row" data-professor-id="" data-department="CEA" data-day="Friday">
                    <td>Lim</td><td>CEA</td><td>07:30 AM - 09:00 AM</td><td>Friday</td>
                </tr>
                <tr class="header-row"><td>ignored</td></tr>
            </tbody></table>"#,
        );

        let rows = read_schedule_rows(&container).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].professor_id, None);
        assert_eq!(rows[0].professor_id.as_deref(), Some("5"));
        assert_eq!(rows[0].search_text, "santos csit104");
        assert_eq!(rows[0].interval(), Some((540, 630)));
    }

    #[wasm_bindgen_test]
    fn test_read_schedule_query_from_root() {
        let root = document().create_element("div").unwrap();
        root.set_attribute("data-department", "CCS").unwrap();
        root.set_attribute("data-day", "Monday").unwrap();
        root.set_attribute("data-timeslot", "").unwrap();

        let query = read_schedule_query(&root);
        assert_eq!(query.department.as_deref(), Some("CCS"));
        assert_eq!(query.day.as_deref(), Some("Monday"));
        assert_eq!(query.timeslot, None);
        assert_eq!(query.to_query_string(), "?department=CCS&day=Monday");
    }

    #[wasm_bindgen_test]
    fn test_read_filter_tabs_from_markup() {
        let container = document().create_element("div").unwrap();
        container.set_inner_html(
            r#"<button class="tab" data-filter="all">All</button>
               <button class="tab" data-filter="active"> Active </button>"#,
        );

        let tabs = read_filter_tabs(&container).unwrap();
        assert_eq!(tabs, vec![UserFilterTab::new("all", "All"), UserFilterTab::new("active", "Active")]);
    }
}
