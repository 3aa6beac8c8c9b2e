//! Reducer composition utilities
//!
//! Parent features embed child features in two shapes:
//! - **`if_let`**: the child state lives in an optional slot (a presented
//!   sheet, an alert). Child actions arrive wrapped in
//!   [`PresentationAction`].
//! - **`for_each`**: the child state is one element of an
//!   [`IdentifiedVec`]. Child actions arrive wrapped in
//!   [`IdentifiedAction`].
//!
//! Both run the child reducer first, lift its effects into the parent's
//! action type, then run the parent reducer with the original action so the
//! parent can react to child outcomes.
//!
//! # Example
//!
//! ```
//! use row_bindings_core::composition::{if_let, CasePath};
//! use row_bindings_core::presentation::PresentationAction;
//! use row_bindings_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter {
//!     count: i32,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CounterAction {
//!     Increment,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = Counter;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Counter, _: CounterAction, _: &()) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         SmallVec::new()
//!     }
//! }
//!
//! #[derive(Clone, Debug, Default)]
//! struct App {
//!     sheet: Option<Counter>,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum AppAction {
//!     Sheet(PresentationAction<CounterAction>),
//! }
//!
//! struct AppReducer;
//!
//! impl Reducer for AppReducer {
//!     type State = App;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, _: &mut App, _: AppAction, _: &()) -> SmallVec<[Effect<AppAction>; 4]> {
//!         SmallVec::new()
//!     }
//! }
//!
//! let app = if_let(
//!     AppReducer,
//!     CounterReducer,
//!     |state: &mut App| &mut state.sheet,
//!     CasePath::new(
//!         |action: &AppAction| match action {
//!             AppAction::Sheet(inner) => Some(inner.clone()),
//!         },
//!         AppAction::Sheet,
//!     ),
//! );
//!
//! let mut state = App { sheet: Some(Counter::default()) };
//! app.reduce(&mut state, AppAction::Sheet(PresentationAction::Presented(CounterAction::Increment)), &());
//! assert_eq!(state.sheet.as_ref().map(|c| c.count), Some(1));
//!
//! app.reduce(&mut state, AppAction::Sheet(PresentationAction::Dismiss), &());
//! assert!(state.sheet.is_none());
//! ```

use crate::effect::Effect;
use crate::identified::{Identifiable, IdentifiedAction, IdentifiedVec};
use crate::presentation::PresentationAction;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Extracts a child action from a parent action and embeds it back
///
/// `extract` returns an owned copy of the child payload when `root` is the
/// matching variant; `embed` is usually the variant constructor itself.
pub struct CasePath<Root, Value> {
    extract: fn(&Root) -> Option<Value>,
    embed: fn(Value) -> Root,
}

impl<Root, Value> CasePath<Root, Value> {
    /// Create a case path from its two halves
    #[must_use]
    pub const fn new(extract: fn(&Root) -> Option<Value>, embed: fn(Value) -> Root) -> Self {
        Self { extract, embed }
    }

    /// The child payload of `root`, if it is the matching variant
    #[must_use]
    pub fn extract(&self, root: &Root) -> Option<Value> {
        (self.extract)(root)
    }

    /// Wrap a child payload into the parent type
    #[must_use]
    pub fn embed(&self, value: Value) -> Root {
        (self.embed)(value)
    }
}

impl<Root, Value> Clone for CasePath<Root, Value> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, Value> Copy for CasePath<Root, Value> {}

impl<Root, Value> std::fmt::Debug for CasePath<Root, Value> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CasePath").finish_non_exhaustive()
    }
}

/// Runs `child` on an optional slot of the parent state
///
/// Behavior per action:
/// - `Presented(child_action)` with the slot populated: the child reduces
///   first, then the parent sees the original action.
/// - `Presented(_)` with the slot empty: logged and dropped for the child;
///   the parent still runs.
/// - `Dismiss`: the parent runs, then the slot is cleared.
/// - anything else: only the parent runs.
#[must_use]
pub fn if_let<P, C>(
    parent: P,
    child: C,
    state: fn(&mut P::State) -> &mut Option<C::State>,
    action: CasePath<P::Action, PresentationAction<C::Action>>,
) -> IfLetReducer<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    IfLetReducer {
        parent,
        child,
        state,
        action,
        ephemeral: None,
    }
}

/// A parent reducer with an optionally presented child
///
/// Created by [`if_let`].
pub struct IfLetReducer<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    parent: P,
    child: C,
    state: fn(&mut P::State) -> &mut Option<C::State>,
    action: CasePath<P::Action, PresentationAction<C::Action>>,
    ephemeral: Option<fn(&C::State) -> bool>,
}

impl<P, C> IfLetReducer<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
{
    /// Clear the slot after any presented action when `is_ephemeral` holds
    /// for the child state
    ///
    /// Alerts are ephemeral: tapping any of their buttons closes them.
    #[must_use]
    pub const fn ephemeral_when(mut self, is_ephemeral: fn(&C::State) -> bool) -> Self {
        self.ephemeral = Some(is_ephemeral);
        self
    }
}

impl<P, C> Clone for IfLetReducer<P, C>
where
    P: Reducer + Clone,
    C: Reducer<Environment = P::Environment> + Clone,
{
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            child: self.child.clone(),
            state: self.state,
            action: self.action,
            ephemeral: self.ephemeral,
        }
    }
}

impl<P, C> std::fmt::Debug for IfLetReducer<P, C>
where
    P: Reducer + std::fmt::Debug,
    C: Reducer<Environment = P::Environment> + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfLetReducer")
            .field("parent", &self.parent)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

impl<P, C> Reducer for IfLetReducer<P, C>
where
    P: Reducer,
    P::Action: Send + 'static,
    C: Reducer<Environment = P::Environment>,
    C::Action: Send + 'static,
{
    type State = P::State;
    type Action = P::Action;
    type Environment = P::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();
        let mut clear_after = false;

        match self.action.extract(&action) {
            Some(PresentationAction::Presented(child_action)) => {
                if let Some(child_state) = (self.state)(state).as_mut() {
                    let embed = self.action.embed;
                    effects.extend(
                        self.child
                            .reduce(child_state, child_action, env)
                            .into_iter()
                            .map(|effect| {
                                effect.map(move |a| embed(PresentationAction::Presented(a)))
                            }),
                    );
                    clear_after = self.ephemeral.is_some_and(|is_ephemeral| is_ephemeral(child_state));
                } else {
                    tracing::warn!("Presented action received while nothing is presented");
                }
            },
            Some(PresentationAction::Dismiss) => clear_after = true,
            None => {},
        }

        effects.extend(self.parent.reduce(state, action, env));

        if clear_after {
            tracing::debug!("Clearing presented state");
            *(self.state)(state) = None;
        }

        effects
    }
}

/// Runs `child` on the element of an [`IdentifiedVec`] an action addresses
///
/// Actions for ids that are no longer present are logged and dropped for
/// the child; the parent still runs.
#[must_use]
pub fn for_each<P, C>(
    parent: P,
    child: C,
    elements: fn(&mut P::State) -> &mut IdentifiedVec<C::State>,
    action: CasePath<P::Action, IdentifiedAction<<C::State as Identifiable>::Id, C::Action>>,
) -> ForEachReducer<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
    C::State: Identifiable,
{
    ForEachReducer {
        parent,
        child,
        elements,
        action,
    }
}

/// A parent reducer over a collection of child states
///
/// Created by [`for_each`].
pub struct ForEachReducer<P, C>
where
    P: Reducer,
    C: Reducer<Environment = P::Environment>,
    C::State: Identifiable,
{
    parent: P,
    child: C,
    elements: fn(&mut P::State) -> &mut IdentifiedVec<C::State>,
    action: CasePath<P::Action, IdentifiedAction<<C::State as Identifiable>::Id, C::Action>>,
}

impl<P, C> Clone for ForEachReducer<P, C>
where
    P: Reducer + Clone,
    C: Reducer<Environment = P::Environment> + Clone,
    C::State: Identifiable,
{
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            child: self.child.clone(),
            elements: self.elements,
            action: self.action,
        }
    }
}

impl<P, C> std::fmt::Debug for ForEachReducer<P, C>
where
    P: Reducer + std::fmt::Debug,
    C: Reducer<Environment = P::Environment> + std::fmt::Debug,
    C::State: Identifiable,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForEachReducer")
            .field("parent", &self.parent)
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

impl<P, C> Reducer for ForEachReducer<P, C>
where
    P: Reducer,
    P::Action: Send + 'static,
    C: Reducer<Environment = P::Environment>,
    C::Action: Send + 'static,
    C::State: Identifiable,
    <C::State as Identifiable>::Id: Send + Sync + 'static,
{
    type State = P::State;
    type Action = P::Action;
    type Environment = P::Environment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut effects = SmallVec::new();

        if let Some(IdentifiedAction::Element { id, action: child_action }) =
            self.action.extract(&action)
        {
            if let Some(element) = (self.elements)(state).get_mut(&id) {
                let embed = self.action.embed;
                effects.extend(
                    self.child
                        .reduce(element, child_action, env)
                        .into_iter()
                        .map(|effect| {
                            let id = id.clone();
                            effect.map(move |a| embed(IdentifiedAction::element(id.clone(), a)))
                        }),
                );
            } else {
                tracing::warn!(id = ?id, "Element action received for a missing element");
            }
        }

        effects.extend(self.parent.reduce(state, action, env));
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::PresentationAction;
    use crate::smallvec;
    use std::time::Duration;

    // ---------- Shared child ----------

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Item {
        id: u8,
        value: i32,
    }

    impl Identifiable for Item {
        type Id = u8;

        fn id(&self) -> u8 {
            self.id
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ItemAction {
        Add(i32),
        Echo,
    }

    #[derive(Clone)]
    struct ItemReducer;

    impl Reducer for ItemReducer {
        type State = Item;
        type Action = ItemAction;
        type Environment = ();

        fn reduce(&self, state: &mut Item, action: ItemAction, _: &()) -> SmallVec<[Effect<ItemAction>; 4]> {
            match action {
                ItemAction::Add(n) => {
                    state.value += n;
                    SmallVec::new()
                },
                ItemAction::Echo => smallvec![Effect::Delay {
                    duration: Duration::from_millis(1),
                    action: Box::new(ItemAction::Add(1)),
                }],
            }
        }
    }

    // ---------- if_let ----------

    #[derive(Clone, Debug, Default)]
    struct Host {
        slot: Option<Item>,
        seen: Vec<String>,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum HostAction {
        Slot(PresentationAction<ItemAction>),
        Open,
    }

    #[derive(Clone)]
    struct HostReducer;

    impl Reducer for HostReducer {
        type State = Host;
        type Action = HostAction;
        type Environment = ();

        fn reduce(&self, state: &mut Host, action: HostAction, _: &()) -> SmallVec<[Effect<HostAction>; 4]> {
            match action {
                HostAction::Open => state.slot = Some(Item::default()),
                HostAction::Slot(PresentationAction::Presented(_)) => {
                    let value = state.slot.as_ref().map_or(-1, |item| item.value);
                    state.seen.push(format!("presented:{value}"));
                },
                HostAction::Slot(PresentationAction::Dismiss) => state.seen.push("dismiss".into()),
            }
            SmallVec::new()
        }
    }

    fn host() -> IfLetReducer<HostReducer, ItemReducer> {
        if_let(
            HostReducer,
            ItemReducer,
            |state: &mut Host| &mut state.slot,
            CasePath::new(
                |action: &HostAction| match action {
                    HostAction::Slot(inner) => Some(inner.clone()),
                    HostAction::Open => None,
                },
                HostAction::Slot,
            ),
        )
    }

    #[test]
    fn child_runs_before_parent() {
        let mut state = Host {
            slot: Some(Item::default()),
            ..Host::default()
        };
        host().reduce(&mut state, HostAction::Slot(PresentationAction::Presented(ItemAction::Add(4))), &());

        assert_eq!(state.slot.as_ref().map(|i| i.value), Some(4));
        assert_eq!(state.seen, vec!["presented:4".to_string()]);
    }

    #[test]
    fn presented_action_without_state_only_reaches_parent() {
        let mut state = Host::default();
        host().reduce(&mut state, HostAction::Slot(PresentationAction::Presented(ItemAction::Add(4))), &());

        assert!(state.slot.is_none());
        assert_eq!(state.seen, vec!["presented:-1".to_string()]);
    }

    #[test]
    fn dismiss_clears_after_parent() {
        let mut state = Host::default();
        let reducer = host();
        reducer.reduce(&mut state, HostAction::Open, &());
        assert!(state.slot.is_some());

        reducer.reduce(&mut state, HostAction::Slot(PresentationAction::Dismiss), &());
        assert!(state.slot.is_none());
        assert_eq!(state.seen, vec!["dismiss".to_string()]);
    }

    #[test]
    fn ephemeral_child_clears_after_presented_action() {
        let reducer = host().ephemeral_when(|item| item.value > 0);
        let mut state = Host {
            slot: Some(Item::default()),
            ..Host::default()
        };

        reducer.reduce(&mut state, HostAction::Slot(PresentationAction::Presented(ItemAction::Add(0))), &());
        assert!(state.slot.is_some());

        reducer.reduce(&mut state, HostAction::Slot(PresentationAction::Presented(ItemAction::Add(2))), &());
        assert!(state.slot.is_none());
    }

    #[test]
    fn child_effects_are_lifted() {
        let mut state = Host {
            slot: Some(Item::default()),
            ..Host::default()
        };
        let effects = host().reduce(&mut state, HostAction::Slot(PresentationAction::Presented(ItemAction::Echo)), &());

        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Delay { action, .. } => assert_eq!(
                **action,
                HostAction::Slot(PresentationAction::Presented(ItemAction::Add(1)))
            ),
            other => panic!("unexpected effect: {other:?}"),
        }
    }

    // ---------- for_each ----------

    #[derive(Clone, Debug, Default)]
    struct List {
        items: IdentifiedVec<Item>,
        touched: usize,
    }

    #[derive(Clone, Debug, PartialEq)]
    enum ListAction {
        Items(IdentifiedAction<u8, ItemAction>),
    }

    #[derive(Clone)]
    struct ListReducer;

    impl Reducer for ListReducer {
        type State = List;
        type Action = ListAction;
        type Environment = ();

        fn reduce(&self, state: &mut List, _: ListAction, _: &()) -> SmallVec<[Effect<ListAction>; 4]> {
            state.touched += 1;
            SmallVec::new()
        }
    }

    fn list() -> ForEachReducer<ListReducer, ItemReducer> {
        for_each(
            ListReducer,
            ItemReducer,
            |state: &mut List| &mut state.items,
            CasePath::new(
                |action: &ListAction| match action {
                    ListAction::Items(inner) => Some(inner.clone()),
                },
                ListAction::Items,
            ),
        )
    }

    fn two_items() -> List {
        List {
            items: IdentifiedVec::from_elements(vec![
                Item { id: 1, value: 0 },
                Item { id: 2, value: 0 },
            ]),
            touched: 0,
        }
    }

    #[test]
    fn routes_to_addressed_element() {
        let mut state = two_items();
        list().reduce(&mut state, ListAction::Items(IdentifiedAction::element(2, ItemAction::Add(5))), &());

        assert_eq!(state.items.get(&1).map(|i| i.value), Some(0));
        assert_eq!(state.items.get(&2).map(|i| i.value), Some(5));
        assert_eq!(state.touched, 1);
    }

    #[test]
    fn missing_element_still_reaches_parent() {
        let mut state = two_items();
        list().reduce(&mut state, ListAction::Items(IdentifiedAction::element(9, ItemAction::Add(5))), &());

        assert!(state.items.iter().all(|i| i.value == 0));
        assert_eq!(state.touched, 1);
    }

    #[test]
    fn element_effects_keep_their_id() {
        let mut state = two_items();
        let effects = list().reduce(&mut state, ListAction::Items(IdentifiedAction::element(1, ItemAction::Echo)), &());

        match &effects[0] {
            Effect::Delay { action, .. } => assert_eq!(
                **action,
                ListAction::Items(IdentifiedAction::element(1, ItemAction::Add(1)))
            ),
            other => panic!("unexpected effect: {other:?}"),
        }
    }
}
