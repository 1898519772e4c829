use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use crate::core::FileKind;

pub const CLOSE_GLYPH: &str = "×";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub name: String,
    pub icon: &'static str,
}

impl Tab {
    pub fn new(name: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            icon: kind.icon(),
        }
    }

    pub fn body_label(&self) -> String {
        format!(" {} {} ", self.icon, self.name)
    }
}

/// Screen columns occupied by one tab in the tab row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRegion {
    pub name: String,
    pub label: String,
    pub body: Range<u16>,
    pub close: u16,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabHit {
    Activate(String),
    Close(String),
}

#[derive(Debug, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tab: Tab) {
        self.tabs.push(tab);
    }

    /// Removes a tab. If it was active the strip is left with no active tab
    /// until the caller activates another one.
    pub fn remove(&mut self, name: &str) -> Option<Tab> {
        let index = self.position(name)?;
        let active_name = self.active_name().map(str::to_string);
        let tab = self.tabs.remove(index);
        self.active = active_name
            .filter(|n| n != name)
            .and_then(|n| self.position(&n));
        Some(tab)
    }

    pub fn activate(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.active = Some(index);
                true
            }
            None => false,
        }
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active
            .and_then(|i| self.tabs.get(i))
            .map(|t| t.name.as_str())
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_name() == Some(name)
    }

    pub fn neighbor(&self, offset: isize) -> Option<&str> {
        if self.tabs.is_empty() {
            return None;
        }
        let len = self.tabs.len() as isize;
        let current = self.active.unwrap_or(0) as isize;
        let index = (current + offset).rem_euclid(len) as usize;
        self.tabs.get(index).map(|t| t.name.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Lays the tabs out left to right as `<body><close> ` cells.
    pub fn regions(&self) -> Vec<TabRegion> {
        let mut x: u16 = 0;
        self.tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                let label = tab.body_label();
                let width = label.width() as u16;
                let body = x..x.saturating_add(width);
                let close = body.end;
                x = close.saturating_add(2);
                TabRegion {
                    name: tab.name.clone(),
                    label,
                    body,
                    close,
                    active: self.active == Some(i),
                }
            })
            .collect()
    }

    pub fn hit_test(&self, column: u16) -> Option<TabHit> {
        self.regions().into_iter().find_map(|region| {
            if column == region.close {
                Some(TabHit::Close(region.name))
            } else if region.body.contains(&column) {
                Some(TabHit::Activate(region.name))
            } else {
                None
            }
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(names: &[&str]) -> TabStrip {
        let mut strip = TabStrip::new();
        for name in names {
            strip.push(Tab::new(*name, FileKind::from_name(name).unwrap()));
        }
        strip
    }

    #[test]
    fn test_activate() {
        let mut tabs = strip(&["index.html", "style.css"]);
        assert_eq!(tabs.active_name(), None);
        assert!(tabs.activate("style.css"));
        assert!(tabs.is_active("style.css"));
        assert!(!tabs.activate("missing.js"));
        assert!(tabs.is_active("style.css"));
    }

    #[test]
    fn test_remove_keeps_other_active() {
        let mut tabs = strip(&["a.js", "b.js", "c.js"]);
        tabs.activate("c.js");
        tabs.remove("a.js");
        assert_eq!(tabs.active_name(), Some("c.js"));
        assert_eq!(tabs.names(), vec!["b.js", "c.js"]);
    }

    #[test]
    fn test_remove_active_clears_selection() {
        let mut tabs = strip(&["a.js", "b.js"]);
        tabs.activate("b.js");
        tabs.remove("b.js");
        assert_eq!(tabs.active_name(), None);
    }

    #[test]
    fn test_neighbor_wraps() {
        let mut tabs = strip(&["a.js", "b.js", "c.js"]);
        tabs.activate("c.js");
        assert_eq!(tabs.neighbor(1), Some("a.js"));
        assert_eq!(tabs.neighbor(-1), Some("b.js"));
    }

    #[test]
    fn test_regions() {
        let mut tabs = strip(&["a.js", "b.css"]);
        tabs.activate("b.css");
        let regions = tabs.regions();
        // " JS a.js " is 9 columns wide.
        assert_eq!(regions[0].body, 0..9);
        assert_eq!(regions[0].close, 9);
        assert_eq!(regions[1].body.start, 11);
        assert!(!regions[0].active);
        assert!(regions[1].active);
    }

    #[test]
    fn test_hit_test_close_does_not_activate() {
        let tabs = strip(&["a.js", "b.css"]);
        assert_eq!(tabs.hit_test(0), Some(TabHit::Activate("a.js".to_string())));
        assert_eq!(tabs.hit_test(8), Some(TabHit::Activate("a.js".to_string())));
        assert_eq!(tabs.hit_test(9), Some(TabHit::Close("a.js".to_string())));
        assert_eq!(tabs.hit_test(10), None);
        assert_eq!(tabs.hit_test(11), Some(TabHit::Activate("b.css".to_string())));
        assert_eq!(tabs.hit_test(200), None);
    }
}
