//! Click-to-navigation routing via delegated hit resolution.
//!
//! One router serves the whole panel: a click anywhere is resolved by
//! walking up from the hit target to the nearest enclosing card, instead of
//! wiring a handler to every card. [`resolve`] is the pure walk;
//! [`Router`] turns a resolved id into a navigation intent for the host's
//! [`Navigator`].

/// Default route prefix for detail navigation.
pub const DETAIL_ROUTE: &str = "/image";

/// A node handle in the host's hit tree.
///
/// Handles are cheap values (typically an index into an arena plus a
/// borrow of it). Implementors only answer whether a node is a selectable
/// card, what place id it carries, and who its parent is; the walk itself
/// lives here, testable without any live view tree.
pub trait HitNode: Sized {
    /// Whether this node is a selectable card.
    fn is_card(&self) -> bool;

    /// The place id attached to this node, if any.
    fn place_id(&self) -> Option<&str>;

    fn parent(&self) -> Option<Self>;
}

/// Resolve a hit target to a place id.
///
/// Walks from the target up through its ancestors to the nearest card.
/// No enclosing card, or a card with no id attached, resolves to `None`
/// and the click is ignored.
#[must_use]
pub fn resolve<N: HitNode>(target: N) -> Option<String> {
    let mut node = Some(target);
    while let Some(current) = node {
        if current.is_card() {
            return current.place_id().map(ToOwned::to_owned);
        }
        node = current.parent();
    }
    None
}

/// A request to show a place's detail view. Constructing and dispatching
/// the intent is this module's whole job; performing the navigation is the
/// host's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavIntent {
    place_id: String,
    path: String,
}

impl NavIntent {
    pub fn new(route_prefix: &str, place_id: impl Into<String>) -> Self {
        let place_id = place_id.into();
        let path = format!("{}/{place_id}", route_prefix.trim_end_matches('/'));
        Self { place_id, path }
    }

    #[must_use]
    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    /// Route form of the intent, e.g. `/image/p2`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Navigation collaborator.
pub trait Navigator {
    fn navigate(&mut self, intent: NavIntent);
}

/// Delegated click handler: resolves targets and dispatches intents.
#[derive(Debug)]
pub struct Router<N> {
    navigator: N,
    route_prefix: String,
}

impl<N: Navigator> Router<N> {
    pub fn new(navigator: N, route_prefix: impl Into<String>) -> Self {
        Self {
            navigator,
            route_prefix: route_prefix.into(),
        }
    }

    /// Install this router into the host's single document-level slot.
    ///
    /// A slot holds at most one router; installing into an occupied slot is
    /// rejected and hands the router back, so a click can never dispatch
    /// two intents through double-bound handlers.
    pub fn install(self, slot: &mut Option<Self>) -> Result<(), Self> {
        if slot.is_some() {
            return Err(self);
        }
        *slot = Some(self);
        Ok(())
    }

    /// Handle a click on the given target.
    ///
    /// Returns `true` when an intent was dispatched. Clicks that resolve to
    /// no card, or to a card without an id, are ignored.
    pub fn handle_click<H: HitNode>(&mut self, target: H) -> bool {
        let Some(place_id) = resolve(target) else {
            return false;
        };
        self.dispatch(&place_id);
        true
    }

    /// Dispatch an intent for an already-resolved place id (the keyboard
    /// equivalent of a click).
    pub fn dispatch(&mut self, place_id: &str) {
        let intent = NavIntent::new(&self.route_prefix, place_id);
        self.navigator.navigate(intent);
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arena-backed test tree, the shape hosts use: nodes store an optional
    /// card marker (whose inner option is the attached id) and a parent
    /// index.
    struct Arena {
        nodes: Vec<(Option<Option<String>>, Option<usize>)>,
    }

    impl Arena {
        fn new() -> Self {
            Self { nodes: Vec::new() }
        }

        fn plain(&mut self, parent: Option<usize>) -> usize {
            self.nodes.push((None, parent));
            self.nodes.len() - 1
        }

        fn card(&mut self, id: Option<&str>, parent: Option<usize>) -> usize {
            self.nodes.push((Some(id.map(String::from)), parent));
            self.nodes.len() - 1
        }

        fn node(&self, index: usize) -> Node<'_> {
            Node { arena: self, index }
        }
    }

    #[derive(Clone, Copy)]
    struct Node<'a> {
        arena: &'a Arena,
        index: usize,
    }

    impl HitNode for Node<'_> {
        fn is_card(&self) -> bool {
            self.arena.nodes[self.index].0.is_some()
        }

        fn place_id(&self) -> Option<&str> {
            self.arena.nodes[self.index].0.as_ref()?.as_deref()
        }

        fn parent(&self) -> Option<Self> {
            self.arena.nodes[self.index].1.map(|index| Node {
                arena: self.arena,
                index,
            })
        }
    }

    #[derive(Default)]
    struct RecordingNavigator {
        intents: Vec<NavIntent>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&mut self, intent: NavIntent) {
            self.intents.push(intent);
        }
    }

    #[test]
    fn test_resolve_walks_to_nearest_card() {
        // list -> card(p2) -> text block -> rating line
        let mut arena = Arena::new();
        let list = arena.plain(None);
        let card = arena.card(Some("p2"), Some(list));
        let text_block = arena.plain(Some(card));
        let rating_line = arena.plain(Some(text_block));

        assert_eq!(resolve(arena.node(rating_line)).as_deref(), Some("p2"));
    }

    #[test]
    fn test_resolve_on_the_card_itself() {
        let mut arena = Arena::new();
        let card = arena.card(Some("p1"), None);
        assert_eq!(resolve(arena.node(card)).as_deref(), Some("p1"));
    }

    #[test]
    fn test_resolve_outside_any_card() {
        let mut arena = Arena::new();
        let root = arena.plain(None);
        let header = arena.plain(Some(root));
        assert_eq!(resolve(arena.node(header)), None);
    }

    #[test]
    fn test_card_without_id_swallows_the_click() {
        // The nearest card has no id; resolution stops there rather than
        // bubbling on to an outer card.
        let mut arena = Arena::new();
        let outer = arena.card(Some("outer"), None);
        let inner = arena.card(None, Some(outer));
        let target = arena.plain(Some(inner));

        assert_eq!(resolve(arena.node(target)), None);
    }

    #[test]
    fn test_click_dispatches_intent() {
        let mut arena = Arena::new();
        let card = arena.card(Some("p2"), None);
        let target = arena.plain(Some(card));

        let mut router = Router::new(RecordingNavigator::default(), DETAIL_ROUTE);
        assert!(router.handle_click(arena.node(target)));

        let intents = &router.navigator().intents;
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].place_id(), "p2");
        assert_eq!(intents[0].path(), "/image/p2");
    }

    #[test]
    fn test_ignored_click_dispatches_nothing() {
        let mut arena = Arena::new();
        let target = arena.plain(None);

        let mut router = Router::new(RecordingNavigator::default(), DETAIL_ROUTE);
        assert!(!router.handle_click(arena.node(target)));
        assert!(router.navigator().intents.is_empty());
    }

    #[test]
    fn test_custom_route_prefix() {
        let mut router = Router::new(RecordingNavigator::default(), "/detail/");
        router.dispatch("p7");
        assert_eq!(router.navigator().intents[0].path(), "/detail/p7");
    }

    #[test]
    fn test_install_rejects_second_router() {
        let mut slot = None;
        let first = Router::new(RecordingNavigator::default(), DETAIL_ROUTE);
        assert!(first.install(&mut slot).is_ok());

        let second = Router::new(RecordingNavigator::default(), DETAIL_ROUTE);
        assert!(second.install(&mut slot).is_err());

        // The installed router still works through the slot.
        let mut arena = Arena::new();
        let card = arena.card(Some("p1"), None);
        assert!(slot.as_mut().unwrap().handle_click(arena.node(card)));
        assert_eq!(slot.as_ref().unwrap().navigator().intents.len(), 1);
    }
}
