// Copyright 2025 the Quire Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The directory of selectables taking part in one selection container.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use quire::kurbo::Point;
use quire::{SelectableId, Selection, SelectionAdjustment};

use crate::coordinates::LayoutCoordinates;
use crate::selectable::Selectable;

/// A notification from a selectable (or its gesture handling) to the selection manager.
///
/// Events are queued by the [`SelectionRegistrar`] and handled in order by
/// [`SelectionManager::process_registrar_events`].
///
/// [`SelectionManager::process_registrar_events`]: crate::SelectionManager::process_registrar_events
#[derive(Clone)]
pub enum RegistrarEvent {
    /// A selectable moved or was laid out again.
    PositionChanged(SelectableId),
    /// A new selection starts at `position`, local to `coordinates`.
    SelectionStart {
        /// Coordinates `position` is relative to.
        coordinates: Rc<dyn LayoutCoordinates>,
        /// Where the selection starts.
        position: Point,
        /// How to snap the initial range.
        adjustment: SelectionAdjustment,
    },
    /// The moving handle of the current selection moved.
    SelectionUpdate {
        /// Coordinates both positions are relative to.
        coordinates: Rc<dyn LayoutCoordinates>,
        /// Where the handle is now.
        new_position: Point,
        /// Where the handle was.
        previous_position: Point,
        /// Whether the start handle is the one moving.
        is_start_handle: bool,
        /// How to snap the range.
        adjustment: SelectionAdjustment,
    },
    /// The gesture driving the selection ended.
    SelectionEnd,
    /// Select all the text of one selectable.
    SelectAll(SelectableId),
    /// The content of a selectable changed.
    SelectableChanged(SelectableId),
    /// A selectable was unsubscribed.
    SelectableUnsubscribed(SelectableId),
}

impl fmt::Debug for RegistrarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionChanged(id) => f.debug_tuple("PositionChanged").field(id).finish(),
            Self::SelectionStart {
                position,
                adjustment,
                ..
            } => f
                .debug_struct("SelectionStart")
                .field("position", position)
                .field("adjustment", adjustment)
                .finish_non_exhaustive(),
            Self::SelectionUpdate {
                new_position,
                previous_position,
                is_start_handle,
                adjustment,
                ..
            } => f
                .debug_struct("SelectionUpdate")
                .field("new_position", new_position)
                .field("previous_position", previous_position)
                .field("is_start_handle", is_start_handle)
                .field("adjustment", adjustment)
                .finish_non_exhaustive(),
            Self::SelectionEnd => f.write_str("SelectionEnd"),
            Self::SelectAll(id) => f.debug_tuple("SelectAll").field(id).finish(),
            Self::SelectableChanged(id) => f.debug_tuple("SelectableChanged").field(id).finish(),
            Self::SelectableUnsubscribed(id) => {
                f.debug_tuple("SelectableUnsubscribed").field(id).finish()
            }
        }
    }
}

/// Keeps track of subscribed selectables and their subselections.
///
/// The registrar is shared (usually as `Rc<RefCell<SelectionRegistrar>>`) between the
/// [`SelectionManager`] and the selectables in its container. Selectables report changes through
/// the `notify_*` methods, which queue a [`RegistrarEvent`] for the manager.
///
/// [`SelectionManager`]: crate::SelectionManager
#[derive(Debug, Default)]
pub struct SelectionRegistrar {
    selectables: HashMap<SelectableId, Rc<dyn Selectable>>,
    /// Subscription order; the sort is stable with respect to it.
    order: Vec<SelectableId>,
    sorted: Vec<Rc<dyn Selectable>>,
    /// Bumped whenever the reading order may have changed.
    epoch: u64,
    sorted_epoch: Option<u64>,
    last_id: u64,
    subselections: HashMap<SelectableId, Selection>,
    events: Vec<RegistrarEvent>,
}

impl SelectionRegistrar {
    /// Creates an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a fresh id. Never returns [`SelectableId::INVALID`].
    pub fn next_selectable_id(&mut self) -> SelectableId {
        self.last_id += 1;
        SelectableId(self.last_id)
    }

    /// Adds a selectable.
    ///
    /// # Panics
    ///
    /// If the selectable's id is invalid or already subscribed.
    pub fn subscribe(&mut self, selectable: Rc<dyn Selectable>) {
        let id = selectable.selectable_id();
        assert!(id.is_valid(), "cannot subscribe a selectable with an invalid id");
        assert!(
            !self.selectables.contains_key(&id),
            "selectable {id} is already subscribed"
        );
        log::debug!("subscribed selectable {id}");
        self.selectables.insert(id, selectable);
        self.order.push(id);
        self.epoch += 1;
    }

    /// Removes a selectable and tells the manager about it.
    pub fn unsubscribe(&mut self, id: SelectableId) {
        if self.selectables.remove(&id).is_none() {
            return;
        }
        log::debug!("unsubscribed selectable {id}");
        self.order.retain(|other| *other != id);
        self.subselections.remove(&id);
        self.epoch += 1;
        self.events.push(RegistrarEvent::SelectableUnsubscribed(id));
    }

    /// The subscribed selectable with `id`.
    pub fn selectable(&self, id: SelectableId) -> Option<Rc<dyn Selectable>> {
        self.selectables.get(&id).cloned()
    }

    /// Number of subscribed selectables.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Counter that changes whenever the reading order may have changed.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Subscribed selectables in reading order: top to bottom, then left to right.
    ///
    /// Positions are measured in `container` coordinates; selectables that are not placed count
    /// as being at the container origin. The order is cached until a selectable subscribes,
    /// unsubscribes or reports a position change.
    pub fn sort(&mut self, container: &dyn LayoutCoordinates) -> Vec<Rc<dyn Selectable>> {
        if self.sorted_epoch != Some(self.epoch) {
            let mut placed: Vec<(Point, Rc<dyn Selectable>)> = self
                .order
                .iter()
                .filter_map(|id| self.selectables.get(id))
                .map(|selectable| {
                    let position = selectable
                        .layout_coordinates()
                        .map(|c| container.local_position_of(&*c, Point::ZERO))
                        .unwrap_or(Point::ZERO);
                    (position, selectable.clone())
                })
                .collect();
            placed.sort_by(|(a, _), (b, _)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));
            self.sorted = placed.into_iter().map(|(_, s)| s).collect();
            self.sorted_epoch = Some(self.epoch);
        }
        self.sorted.clone()
    }

    /// Per-selectable parts of the current selection.
    pub fn subselections(&self) -> &HashMap<SelectableId, Selection> {
        &self.subselections
    }

    /// The part of the current selection in `id`.
    pub fn subselection(&self, id: SelectableId) -> Option<Selection> {
        self.subselections.get(&id).copied()
    }

    /// Replaces all subselections.
    pub fn set_subselections(&mut self, subselections: HashMap<SelectableId, Selection>) {
        self.subselections = subselections;
    }

    /// Returns `true` if `id` has part of the current selection.
    pub fn has_selection(&self, id: SelectableId) -> bool {
        self.subselections.contains_key(&id)
    }

    /// Reports that selectable `id` moved or was laid out again.
    pub fn notify_position_change(&mut self, id: SelectableId) {
        self.epoch += 1;
        self.events.push(RegistrarEvent::PositionChanged(id));
    }

    /// Starts a new selection at `position`, local to `coordinates`.
    pub fn notify_selection_update_start(
        &mut self,
        coordinates: Rc<dyn LayoutCoordinates>,
        position: Point,
        adjustment: SelectionAdjustment,
    ) {
        self.events.push(RegistrarEvent::SelectionStart {
            coordinates,
            position,
            adjustment,
        });
    }

    /// Replaces the current selection with all the text of `id`.
    pub fn notify_selection_update_select_all(&mut self, id: SelectableId) {
        self.events.push(RegistrarEvent::SelectAll(id));
    }

    /// Moves one handle of the current selection.
    pub fn notify_selection_update(
        &mut self,
        coordinates: Rc<dyn LayoutCoordinates>,
        new_position: Point,
        previous_position: Point,
        is_start_handle: bool,
        adjustment: SelectionAdjustment,
    ) {
        self.events.push(RegistrarEvent::SelectionUpdate {
            coordinates,
            new_position,
            previous_position,
            is_start_handle,
            adjustment,
        });
    }

    /// Ends the gesture driving the selection.
    pub fn notify_selection_update_end(&mut self) {
        self.events.push(RegistrarEvent::SelectionEnd);
    }

    /// Reports that the content of `id` changed.
    pub fn notify_selectable_change(&mut self, id: SelectableId) {
        self.events.push(RegistrarEvent::SelectableChanged(id));
    }

    /// Takes all queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<RegistrarEvent> {
        core::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::PlacedCoordinates;
    use crate::delegate::MultiWidgetSelectionDelegate;
    use quire::MonospaceLayout;
    use quire::kurbo::Size;

    fn placed(
        registrar: &mut SelectionRegistrar,
        origin: Point,
    ) -> (SelectableId, Rc<PlacedCoordinates>) {
        let id = registrar.next_selectable_id();
        let coordinates = Rc::new(PlacedCoordinates::new(origin, Size::new(50.0, 20.0)));
        let delegate = MultiWidgetSelectionDelegate::with_layout(
            id,
            MonospaceLayout::new("text"),
            coordinates.clone(),
        );
        registrar.subscribe(Rc::new(delegate));
        (id, coordinates)
    }

    fn ids(sorted: &[Rc<dyn Selectable>]) -> Vec<u64> {
        sorted.iter().map(|s| s.selectable_id().0).collect()
    }

    #[test]
    fn ids_start_at_one() {
        let mut registrar = SelectionRegistrar::new();
        assert_eq!(registrar.next_selectable_id(), SelectableId(1));
        assert_eq!(registrar.next_selectable_id(), SelectableId(2));
    }

    #[test]
    fn sorts_by_row_then_column() {
        let container = PlacedCoordinates::new(Point::ZERO, Size::new(500.0, 500.0));
        let mut registrar = SelectionRegistrar::new();
        placed(&mut registrar, Point::new(100.0, 40.0));
        placed(&mut registrar, Point::new(0.0, 40.0));
        let (_, third) = placed(&mut registrar, Point::new(300.0, 0.0));
        assert_eq!(ids(&registrar.sort(&container)), [3, 2, 1]);

        // Cached until something reports a change.
        third.set_origin(Point::new(300.0, 100.0));
        assert_eq!(ids(&registrar.sort(&container)), [3, 2, 1]);
        registrar.notify_position_change(SelectableId(3));
        assert_eq!(ids(&registrar.sort(&container)), [2, 1, 3]);
    }

    #[test]
    fn unsubscribe_drops_subselection_and_queues_event() {
        let mut registrar = SelectionRegistrar::new();
        let (id, _) = placed(&mut registrar, Point::ZERO);
        let all = registrar.selectable(id).unwrap().select_all_selection().unwrap();
        registrar.set_subselections([(id, all)].into_iter().collect());
        assert!(registrar.has_selection(id), "select all was recorded");

        let epoch = registrar.epoch();
        registrar.unsubscribe(id);
        assert!(!registrar.has_selection(id), "unsubscribing drops the subselection");
        assert!(registrar.epoch() > epoch, "unsubscribing changes the order");
        assert!(registrar.is_empty(), "nothing is left");
        assert!(matches!(
            registrar.drain_events().as_slice(),
            [RegistrarEvent::SelectableUnsubscribed(SelectableId(1))]
        ));
        assert!(registrar.drain_events().is_empty(), "events are drained");
    }

    #[test]
    #[should_panic(expected = "already subscribed")]
    fn duplicate_subscription_panics() {
        let mut registrar = SelectionRegistrar::new();
        let delegate: Rc<dyn Selectable> = Rc::new(
            MultiWidgetSelectionDelegate::<MonospaceLayout>::new(SelectableId(4)),
        );
        registrar.subscribe(delegate.clone());
        registrar.subscribe(delegate);
    }

    #[test]
    #[should_panic(expected = "invalid id")]
    fn invalid_id_panics() {
        let mut registrar = SelectionRegistrar::new();
        registrar.subscribe(Rc::new(MultiWidgetSelectionDelegate::<MonospaceLayout>::new(
            SelectableId::INVALID,
        )));
    }
}
