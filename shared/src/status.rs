//! Professor availability status and the selector that changes it.

use serde::{Deserialize, Serialize};

pub const STATUS_UPDATE_FAILED: &str = "Failed to update status. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    Available,
    Class,
    OutOfWork,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Available, UserStatus::Class, UserStatus::OutOfWork];

    /// Wire value, also used as the CSS modifier
    pub fn value(&self) -> &'static str {
        match self {
            UserStatus::Available => "available",
            UserStatus::Class => "class",
            UserStatus::OutOfWork => "out-of-work",
        }
    }

    pub fn from_value(value: &str) -> Option<UserStatus> {
        Self::ALL.into_iter().find(|s| s.value() == value.trim())
    }

    /// Displayed label: the value with its first letter upper-cased
    pub fn label(&self) -> String {
        capitalize(self.value())
    }

    /// Class list of the status indicator dot
    pub fn dot_class(&self) -> String {
        format!("status-dot status-{}", self.value())
    }

    pub fn updated_message(&self) -> String {
        format!("Your status has been updated to {}", self.value())
    }
}

impl Default for UserStatus {
    fn default() -> Self {
        UserStatus::Available
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Body of `POST /update_status/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

impl From<UserStatus> for UpdateStatusRequest {
    fn from(status: UserStatus) -> Self {
        Self {
            status: status.value().to_string(),
        }
    }
}

/// Displayed state of the status selector.
///
/// The shown status is updated before the server confirms it and is left
/// as-is if the server later rejects the change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusSelectorState {
    pub current: UserStatus,
    pub is_open: bool,
}

impl StatusSelectorState {
    pub fn new(current: UserStatus) -> Self {
        Self { current, is_open: false }
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// A click landed somewhere on the page. Closes the menu when the click
    /// was outside the selector; returns whether the state changed.
    pub fn outside_click(&mut self, inside_selector: bool) -> bool {
        if self.is_open && !inside_selector {
            self.is_open = false;
            true
        } else {
            false
        }
    }

    /// Apply a selection optimistically and close the menu
    pub fn select(&mut self, status: UserStatus) -> UpdateStatusRequest {
        self.current = status;
        self.is_open = false;
        status.into()
    }

    /// The server rejected the last selection. The shown status is not rolled
    /// back; the returned text replaces the success toast.
    pub fn update_failed(&self) -> &'static str {
        STATUS_UPDATE_FAILED
    }
}

/// Look up a cookie in a `document.cookie` style string and percent-decode it
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw.to_string())
        })
}
