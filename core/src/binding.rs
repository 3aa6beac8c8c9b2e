//! Two-way bindings between view fields and state
//!
//! A text field bound to `state.name` does not write to the state directly.
//! It sends a binding action carrying the new value, and a
//! [`BindingReducer`] applies it. The write therefore flows through the
//! reducer like any other action, where sibling reducers can observe or
//! veto it.
//!
//! The binding enum for a state struct is usually generated with
//! `#[derive(Bindable)]` from `row-bindings-macros`.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;
use std::marker::PhantomData;

/// State whose fields can be written through binding actions
pub trait Bindable {
    /// One variant per bindable field, carrying the new value
    type Binding: Clone + std::fmt::Debug;

    /// Write the binding's value into its field
    fn apply_binding(&mut self, binding: Self::Binding);

    /// Name of the field the binding targets
    fn binding_field(binding: &Self::Binding) -> &'static str;
}

/// Applies binding actions to state
///
/// `extract` picks the binding out of the feature's action enum; every other
/// action passes through untouched.
///
/// # Example
///
/// ```
/// use row_bindings_core::binding::{Bindable, BindingReducer};
/// use row_bindings_core::reducer::Reducer;
///
/// #[derive(Clone, Debug, Default)]
/// struct Form {
///     title: String,
/// }
///
/// #[derive(Clone, Debug)]
/// enum FormBinding {
///     Title(String),
/// }
///
/// impl Bindable for Form {
///     type Binding = FormBinding;
///
///     fn apply_binding(&mut self, binding: FormBinding) {
///         match binding {
///             FormBinding::Title(value) => self.title = value,
///         }
///     }
///
///     fn binding_field(_: &FormBinding) -> &'static str {
///         "title"
///     }
/// }
///
/// #[derive(Clone, Debug)]
/// enum FormAction {
///     Binding(FormBinding),
/// }
///
/// let reducer: BindingReducer<Form, FormAction, ()> = BindingReducer::new(|action| match action {
///     FormAction::Binding(binding) => Some(binding.clone()),
/// });
///
/// let mut form = Form::default();
/// reducer.reduce(&mut form, FormAction::Binding(FormBinding::Title("Hi".into())), &());
/// assert_eq!(form.title, "Hi");
/// ```
pub struct BindingReducer<S: Bindable, A, E> {
    extract: fn(&A) -> Option<S::Binding>,
    _phantom: PhantomData<fn() -> (S, E)>,
}

impl<S: Bindable, A, E> BindingReducer<S, A, E> {
    /// Create a binding reducer from an action extractor
    #[must_use]
    pub const fn new(extract: fn(&A) -> Option<S::Binding>) -> Self {
        Self {
            extract,
            _phantom: PhantomData,
        }
    }

    /// The binding carried by `action`, if any
    #[must_use]
    pub fn binding(&self, action: &A) -> Option<S::Binding> {
        (self.extract)(action)
    }
}

impl<S: Bindable, A, E> Clone for BindingReducer<S, A, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Bindable, A, E> Copy for BindingReducer<S, A, E> {}

impl<S: Bindable, A, E> std::fmt::Debug for BindingReducer<S, A, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingReducer").finish_non_exhaustive()
    }
}

impl<S: Bindable, A, E> Reducer for BindingReducer<S, A, E> {
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: A, _env: &E) -> SmallVec<[Effect<A>; 4]> {
        if let Some(binding) = self.binding(&action) {
            tracing::trace!(field = S::binding_field(&binding), "Applying binding");
            state.apply_binding(binding);
        }
        SmallVec::new()
    }
}
