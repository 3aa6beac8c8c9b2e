//! Presented child state
//!
//! A parent presents a child by storing its state in an `Option` slot. Child
//! actions travel up wrapped in [`PresentationAction::Presented`]; the host
//! closing the child sends [`PresentationAction::Dismiss`]. The
//! [`if_let`](crate::composition::if_let) combinator performs the routing.
//!
//! [`AlertState`] is the standard presented child for confirmations: it has
//! no reducer of its own, and it is ephemeral, meaning any button action
//! dismisses it.

/// Action sent to (or from) a presented child
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationAction<Action> {
    /// An action produced by the presented child
    Presented(Action),
    /// The host closed the child
    Dismiss,
}

impl<Action> PresentationAction<Action> {
    /// The child action, if this is a presented action
    #[must_use]
    pub const fn presented(&self) -> Option<&Action> {
        match self {
            Self::Presented(action) => Some(action),
            Self::Dismiss => None,
        }
    }
}

/// Visual role of an alert button
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ButtonRole {
    /// Plain button
    #[default]
    Default,
    /// Destroys data
    Destructive,
    /// Backs out without acting
    Cancel,
}

/// One button of an [`AlertState`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonState<Action> {
    /// Button title
    pub label: String,
    /// Visual role
    pub role: ButtonRole,
    /// Action sent when tapped; `None` only dismisses
    pub action: Option<Action>,
}

impl<Action> ButtonState<Action> {
    /// A button that sends `action`
    #[must_use]
    pub fn new(label: impl Into<String>, role: ButtonRole, action: Action) -> Self {
        Self {
            label: label.into(),
            role,
            action: Some(action),
        }
    }

    /// A cancel button that only dismisses
    #[must_use]
    pub fn cancel(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: ButtonRole::Cancel,
            action: None,
        }
    }
}

/// Data describing a modal confirmation
///
/// # Example
///
/// ```
/// use row_bindings_core::presentation::{AlertState, ButtonRole, ButtonState};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Confirm {
///     Erase,
/// }
///
/// let alert = AlertState::new("Erase?")
///     .message("This cannot be undone.")
///     .button(ButtonState::new("Erase", ButtonRole::Destructive, Confirm::Erase))
///     .button(ButtonState::cancel("Keep"));
///
/// assert_eq!(alert.actions().collect::<Vec<_>>(), vec![&Confirm::Erase]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertState<Action> {
    /// Alert title
    pub title: String,
    /// Optional body text
    pub message: Option<String>,
    /// Buttons in display order
    pub buttons: Vec<ButtonState<Action>>,
}

impl<Action> AlertState<Action> {
    /// An alert with a title and no buttons
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: None,
            buttons: Vec::new(),
        }
    }

    /// Set the body text
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Append a button
    #[must_use]
    pub fn button(mut self, button: ButtonState<Action>) -> Self {
        self.buttons.push(button);
        self
    }

    /// Actions carried by the buttons, in display order
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.buttons.iter().filter_map(|b| b.action.as_ref())
    }

    /// The button with `role`, if any
    #[must_use]
    pub fn button_with_role(&self, role: ButtonRole) -> Option<&ButtonState<Action>> {
        self.buttons.iter().find(|b| b.role == role)
    }
}
