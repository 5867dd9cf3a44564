//! Change notification between plots and the components they observe.
//!
//! Every mutable component (axis, dataset, renderer, marker, annotation) is
//! wrapped in an [`Observable`], which pairs the value with a listener list.
//! Listeners run synchronously, after the value's borrow has been released, so
//! a listener can read the component that notified it.
//!
//! A plot listens through a [`PlotSignal`]. The signal either forwards an event
//! to its parent plot's signal or, for a root plot, fires the plot's own
//! listeners. Only a root plot ever notifies the outside world.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Which kind of component produced an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChangeSource {
    Axis,
    Dataset,
    Renderer,
    Marker,
    Annotation,
    Plot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    pub source: ChangeSource,
}

impl ChangeEvent {
    pub fn new(source: ChangeSource) -> Self {
        Self { source }
    }

    /// Events after which auto-ranged axes have to be recomputed.
    pub fn invalidates_ranges(&self) -> bool {
        matches!(
            self.source,
            ChangeSource::Axis | ChangeSource::Dataset | ChangeSource::Renderer
        )
    }
}

type Callback<E> = Rc<dyn Fn(&E)>;

/// Ordered list of callbacks.
pub struct Listeners<E> {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(ListenerId, Callback<E>)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(0),
            entries: RefCell::new(Vec::new()),
        }
    }
}

impl<E> Listeners<E> {
    pub fn add(&self, callback: impl Fn(&E) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Calls every listener registered at the time of the call, in
    /// registration order. Listeners may add or remove listeners meanwhile.
    pub fn fire(&self, event: &E) {
        let snapshot: Vec<Callback<E>> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in snapshot {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A component value plus the listeners interested in its changes.
///
/// `update` releases the mutable borrow before notifying, so listeners can
/// read the value back.
pub struct Observable<T: ?Sized> {
    source: ChangeSource,
    listeners: Rc<Listeners<ChangeEvent>>,
    value: RefCell<T>,
}

impl<T> Observable<T> {
    pub fn new(source: ChangeSource, value: T) -> Rc<Self> {
        Rc::new(Self {
            source,
            listeners: Rc::new(Listeners::default()),
            value: RefCell::new(value),
        })
    }
}

impl<T: ?Sized> Observable<T> {
    pub fn source(&self) -> ChangeSource {
        self.source
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Mutates the value, then fires a change event.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.value.borrow_mut());
        self.fire_changed();
        result
    }

    /// Like [`update`](Self::update), but only fires when `f` succeeds.
    pub fn try_update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let result = f(&mut self.value.borrow_mut())?;
        self.fire_changed();
        Ok(result)
    }

    /// Mutation that does not notify. Used for recomputed state such as an
    /// auto-range, which follows from a change that was already announced.
    pub(crate) fn update_quiet<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.value.borrow_mut())
    }

    pub fn add_change_listener(&self, callback: impl Fn(&ChangeEvent) + 'static) -> ListenerId {
        self.listeners.add(callback)
    }

    pub fn remove_change_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn fire_changed(&self) {
        self.listeners.fire(&ChangeEvent::new(self.source));
    }

    pub(crate) fn listeners(&self) -> &Rc<Listeners<ChangeEvent>> {
        &self.listeners
    }
}

/// Identity of an observable, stable for its lifetime.
pub(crate) fn subscription_key<T: ?Sized>(observable: &Observable<T>) -> usize {
    Rc::as_ptr(observable.listeners()) as *const () as usize
}

/// A registered listener that is removed again when dropped.
pub struct Subscription {
    target: Weak<Listeners<ChangeEvent>>,
    id: ListenerId,
}

impl Subscription {
    fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.target.upgrade() {
            listeners.remove(self.id);
        }
    }
}

/// The half of a plot that receives child events.
pub struct PlotSignal {
    parent: RefCell<Weak<PlotSignal>>,
    listeners: Listeners<ChangeEvent>,
    notify: Cell<bool>,
    axes_stale: Cell<bool>,
}

impl Default for PlotSignal {
    fn default() -> Self {
        Self {
            parent: RefCell::new(Weak::new()),
            listeners: Listeners::default(),
            notify: Cell::new(true),
            axes_stale: Cell::new(false),
        }
    }
}

impl PlotSignal {
    pub fn has_parent(&self) -> bool {
        self.parent.borrow().strong_count() > 0
    }

    pub(crate) fn set_parent(&self, parent: Option<&Rc<PlotSignal>>) {
        *self.parent.borrow_mut() = parent.map(Rc::downgrade).unwrap_or_default();
    }

    /// Forwards to the parent plot when there is one; otherwise notifies this
    /// plot's listeners (unless notification is suspended).
    pub fn propagate(&self, event: &ChangeEvent) {
        if event.invalidates_ranges() {
            self.axes_stale.set(true);
        }
        let parent = self.parent.borrow().upgrade();
        match parent {
            Some(parent) => parent.propagate(event),
            None if self.notify.get() => self.listeners.fire(event),
            None => {}
        }
    }

    pub fn add_listener(&self, callback: impl Fn(&ChangeEvent) + 'static) -> ListenerId {
        self.listeners.add(callback)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn set_notify(&self, notify: bool) {
        self.notify.set(notify);
    }

    pub fn is_notify(&self) -> bool {
        self.notify.get()
    }

    pub fn axes_stale(&self) -> bool {
        self.axes_stale.get()
    }

    pub(crate) fn clear_axes_stale(&self) {
        self.axes_stale.set(false);
    }
}

/// Listener registrations held by one plot, at most one per component.
///
/// A component registered at several indices of the same plot still notifies
/// that plot once.
#[derive(Default)]
pub(crate) struct SubscriptionSet {
    entries: HashMap<usize, (Subscription, usize)>,
}

impl SubscriptionSet {
    pub fn acquire<T: ?Sized>(&mut self, observable: &Observable<T>, signal: &Rc<PlotSignal>) -> usize {
        let key = subscription_key(observable);
        if let Some((subscription, count)) = self.entries.get_mut(&key) {
            if subscription.is_alive() {
                *count += 1;
                return key;
            }
        }
        let weak_signal = Rc::downgrade(signal);
        let id = observable.add_change_listener(move |event| {
            if let Some(signal) = weak_signal.upgrade() {
                signal.propagate(event);
            }
        });
        let subscription = Subscription {
            target: Rc::downgrade(observable.listeners()),
            id,
        };
        self.entries.insert(key, (subscription, 1));
        key
    }

    pub fn release(&mut self, key: usize) {
        let remove = match self.entries.get_mut(&key) {
            Some((_, count)) if *count > 1 => {
                *count -= 1;
                false
            }
            Some(_) => true,
            None => false,
        };
        if remove {
            self.entries.remove(&key);
        }
    }
}
