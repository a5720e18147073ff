use super::SelectedDeckStore;
use crate::error::{QuickThinkError, Result};
use crate::model::Deck;
use std::cell::RefCell;
use std::rc::Rc;

type SharedStore = Rc<RefCell<SelectedDeckStore>>;

thread_local! {
    static ACTIVE: RefCell<Option<SharedStore>> = const { RefCell::new(None) };
}

/// Owns the [`SelectedDeckStore`] and makes it reachable through [`use_deck`]
/// for the duration of [`DeckProvider::provide`].
pub struct DeckProvider {
    store: SharedStore,
}

impl DeckProvider {
    pub fn new(store: SelectedDeckStore) -> Self {
        Self {
            store: Rc::new(RefCell::new(store)),
        }
    }

    /// Run `f` with this provider active on the current thread.
    ///
    /// Providers nest: the enclosing provider (if any) is restored when `f`
    /// returns or unwinds.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        let previous = ACTIVE.with(|slot| slot.replace(Some(Rc::clone(&self.store))));
        let _restore = RestoreOnDrop(previous);
        f()
    }
}

struct RestoreOnDrop(Option<SharedStore>);

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        let previous = self.0.take();
        ACTIVE.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Read/write access to the selected deck of the active provider.
#[derive(Clone)]
pub struct DeckHandle {
    store: SharedStore,
}

impl DeckHandle {
    pub fn selected(&self) -> Option<Deck> {
        self.store.borrow().get().cloned()
    }

    pub fn set_selected(&self, deck: Option<Deck>) -> Result<()> {
        self.store.borrow_mut().set(deck)
    }
}

/// Access the selected deck. Fails with [`QuickThinkError::MissingDeckProvider`]
/// when called outside of a provider scope.
pub fn use_deck() -> Result<DeckHandle> {
    ACTIVE
        .with(|slot| slot.borrow().clone())
        .map(|store| DeckHandle { store })
        .ok_or(QuickThinkError::MissingDeckProvider)
}
