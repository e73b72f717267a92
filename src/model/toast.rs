//! Toast notifications held in the store's toast slice.

/// Visual intent of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastIntent {
    /// No particular emphasis.
    #[default]
    None,
    /// Informational, highlighted.
    Primary,
    /// Something finished.
    Success,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Danger,
}

/// A keyed, persistent notification.
///
/// Toasts are identified by `key`; adding a toast with an existing key
/// replaces it instead of stacking a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Stable identifier used for removal.
    pub key: String,
    /// Visual intent.
    pub intent: ToastIntent,
    /// Text shown to the user.
    pub message: String,
}

impl Toast {
    /// Create a toast.
    pub fn new(key: impl Into<String>, intent: ToastIntent, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            intent,
            message: message.into(),
        }
    }
}

/// Key of the connectivity toast.
pub const OFFLINE_TOAST_KEY: &str = "offline";

/// Text of the connectivity toast.
pub const OFFLINE_TOAST_MESSAGE: &str = "You are currently offline.";

/// The toast shown while the offline flag is set.
pub fn offline_toast() -> Toast {
    Toast::new(OFFLINE_TOAST_KEY, ToastIntent::Primary, OFFLINE_TOAST_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_toast_uses_fixed_key_and_message() {
        let toast = offline_toast();
        assert_eq!(toast.key, "offline");
        assert_eq!(toast.message, "You are currently offline.");
        assert_eq!(toast.intent, ToastIntent::Primary);
    }

    #[test]
    fn default_intent_is_none() {
        assert_eq!(ToastIntent::default(), ToastIntent::None);
    }
}
