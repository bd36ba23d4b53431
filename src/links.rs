use serde::Serialize;

use crate::config::{LinkCategory, LinkItem};

/// Entries kept for display: everything not explicitly deactivated, ordered
/// ascending by priority. The sort is stable, so entries sharing a priority
/// keep their configuration order. An empty result is a valid outcome.
pub fn active_links(links: &[LinkItem]) -> Vec<&LinkItem> {
    let mut active: Vec<&LinkItem> = links.iter().filter(|l| l.is_active).collect();
    active.sort_by_key(|l| l.priority);
    active
}

/// Narrows an already-selected sequence to one category, order preserved.
pub fn by_category<'a>(links: &[&'a LinkItem], category: LinkCategory) -> Vec<&'a LinkItem> {
    links
        .iter()
        .filter(|l| l.category == Some(category))
        .copied()
        .collect()
}

/// Explicit `open_in_new_tab` wins; otherwise absolute external URLs open in
/// a new tab and relative ones do not.
pub fn opens_in_new_tab(link: &LinkItem) -> bool {
    link.open_in_new_tab
        .unwrap_or_else(|| link.url.starts_with("http"))
}

/// What the template sees for one card: the display fields of a link plus
/// the resolved new-tab behavior.
#[derive(Debug, Serialize)]
pub struct DisplayLink<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub category: Option<LinkCategory>,
    pub open_in_new_tab: bool
}

impl<'a> DisplayLink<'a> {
    pub fn from_item(link: &'a LinkItem) -> Self {
        DisplayLink {
            id: &link.id,
            title: &link.title,
            url: &link.url,
            description: link.description.as_deref(),
            icon: link.icon.as_deref(),
            category: link.category,
            open_in_new_tab: opens_in_new_tab(link)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, priority: i32) -> LinkItem {
        LinkItem {
            id: id.to_string(),
            title: id.to_string(),
            url: format!("https://example.com/{}", id),
            description: None,
            icon: None,
            category: None,
            priority,
            open_in_new_tab: None,
            is_active: true
        }
    }

    fn ids(links: &[&LinkItem]) -> Vec<String> {
        links.iter().map(|l| l.id.clone()).collect()
    }

    #[test]
    fn inactive_entries_are_excluded() {
        let mut hidden = item("b", 1);
        hidden.is_active = false;
        let links = vec![item("a", 3), hidden, item("c", 1)];

        assert_eq!(ids(&active_links(&links)), ["c", "a"]);
    }

    #[test]
    fn sorted_ascending_by_priority() {
        let links = vec![item("low", 10), item("top", 1), item("mid", 5)];

        assert_eq!(ids(&active_links(&links)), ["top", "mid", "low"]);
    }

    #[test]
    fn equal_priority_keeps_input_order() {
        let links = vec![item("a", 2), item("b", 2), item("c", 2)];

        assert_eq!(ids(&active_links(&links)), ["a", "b", "c"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(active_links(&[]).is_empty());
    }

    #[test]
    fn all_inactive_yields_empty_output() {
        let mut a = item("a", 1);
        a.is_active = false;
        assert!(active_links(&[a]).is_empty());
    }

    #[test]
    fn selection_is_deterministic() {
        let links = vec![item("a", 3), item("b", 1), item("c", 2)];

        assert_eq!(ids(&active_links(&links)), ids(&active_links(&links)));
    }

    #[test]
    fn category_filter_preserves_order() {
        let mut a = item("a", 1);
        a.category = Some(LinkCategory::Social);
        let mut b = item("b", 2);
        b.category = Some(LinkCategory::Website);
        let mut c = item("c", 3);
        c.category = Some(LinkCategory::Social);
        let links = vec![a, b, c];

        let active = active_links(&links);
        assert_eq!(ids(&by_category(&active, LinkCategory::Social)), ["a", "c"]);
        assert_eq!(ids(&by_category(&active, LinkCategory::Website)), ["b"]);
        assert!(by_category(&active, LinkCategory::Shop).is_empty());
    }

    #[test]
    fn uncategorized_entries_match_no_category() {
        let links = vec![item("a", 1)];
        let active = active_links(&links);

        assert!(by_category(&active, LinkCategory::Social).is_empty());
    }

    #[test]
    fn new_tab_inferred_for_external_urls() {
        let external = item("ext", 1);
        let mut internal = item("int", 2);
        internal.url = "/contact".to_string();

        assert!(opens_in_new_tab(&external));
        assert!(!opens_in_new_tab(&internal));
    }

    #[test]
    fn explicit_new_tab_overrides_inference() {
        let mut external = item("ext", 1);
        external.open_in_new_tab = Some(false);
        let mut internal = item("int", 2);
        internal.url = "/contact".to_string();
        internal.open_in_new_tab = Some(true);

        assert!(!opens_in_new_tab(&external));
        assert!(opens_in_new_tab(&internal));
    }

    #[test]
    fn display_link_resolves_new_tab() {
        let mut link = item("a", 1);
        link.description = Some("About".to_string());
        link.icon = Some("globe".to_string());

        let display = DisplayLink::from_item(&link);
        assert_eq!(display.id, "a");
        assert_eq!(display.description, Some("About"));
        assert_eq!(display.icon, Some("globe"));
        assert!(display.open_in_new_tab);
    }
}
