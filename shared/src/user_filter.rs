use serde::{Deserialize, Serialize};

pub const ALL_USERS: &str = "all";

/// A filter tab of the admin user list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilterTab {
    /// `data-filter` value
    pub filter: String,
    pub label: String,
}

impl UserFilterTab {
    pub fn new(filter: &str, label: &str) -> Self {
        Self {
            filter: filter.to_string(),
            label: label.to_string(),
        }
    }

    /// Tabs shown when the page does not provide its own
    pub fn defaults() -> Vec<UserFilterTab> {
        vec![
            UserFilterTab::new(ALL_USERS, "All"),
            UserFilterTab::new("active", "Active"),
            UserFilterTab::new("deactivated", "Deactivated"),
        ]
    }
}

/// Which account status the admin user list is narrowed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    active: String,
}

impl UserFilter {
    pub fn new() -> Self {
        Self {
            active: ALL_USERS.to_string(),
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn select(&mut self, filter: &str) {
        self.active = filter.trim().to_string();
    }

    pub fn is_active_tab(&self, tab: &UserFilterTab) -> bool {
        tab.filter == self.active
    }

    /// Whether a row with the given class list stays visible.
    /// A row belongs to status `s` when it carries the class `s-account`.
    pub fn shows<'a>(&self, row_classes: impl IntoIterator<Item = &'a str>) -> bool {
        if self.active == ALL_USERS {
            return true;
        }
        let wanted = format!("{}-account", self.active);
        row_classes.into_iter().any(|class| class == wanted)
    }
}

impl Default for UserFilter {
    fn default() -> Self {
        Self::new()
    }
}
