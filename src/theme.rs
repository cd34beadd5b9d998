//! Light/dark theme state
//!
//! The theme lives in one [`ThemeContext`] per process. Anything that renders
//! subscribes to it explicitly and unsubscribes when done.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Handle returned by [`ThemeContext::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(Theme)>;

/// Observable holder of the current theme
pub struct ThemeContext {
    current: Theme,
    next_id: u64,
    listeners: Vec<(Subscription, Listener)>,
}

impl ThemeContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            current: theme,
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Register a listener. It is called once immediately with the current
    /// theme, then on every change.
    pub fn subscribe(&mut self, mut listener: impl FnMut(Theme) + 'static) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        listener(self.current);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Switch theme and notify listeners; no-op if unchanged.
    pub fn set(&mut self, theme: Theme) {
        if theme == self.current {
            return;
        }
        tracing::debug!("Theme changed: {} -> {}", self.current, theme);
        self.current = theme;
        for (_, listener) in &mut self.listeners {
            listener(theme);
        }
    }

    pub fn toggle(&mut self) {
        self.set(self.current.toggled());
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
