use super::event::SimEvent;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug)]
pub struct ScheduledEvent {
    pub time: f64,
    pub sequence_num: u64,
    pub event: SimEvent,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time.total_cmp(&other.time) == Ordering::Equal
            && self.sequence_num == other.sequence_num
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default).
        // Ties resolve in insertion order so runs are reproducible.
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.sequence_num.cmp(&self.sequence_num))
    }
}

/// Time-ordered queue of future events
pub struct EventScheduler {
    event_queue: BinaryHeap<ScheduledEvent>,
    sequence_counter: u64,
}

impl EventScheduler {
    /// Create a new EventScheduler
    pub fn new() -> Self {
        Self {
            event_queue: BinaryHeap::new(),
            sequence_counter: 0,
        }
    }

    /// Insert an event, keyed by its timestamp
    pub fn schedule(&mut self, event: SimEvent) {
        let scheduled_event = ScheduledEvent {
            time: event.time,
            sequence_num: self.sequence_counter,
            event,
        };

        self.event_queue.push(scheduled_event);
        self.sequence_counter += 1;
    }

    /// Remove and return the earliest event, or None when the queue is empty
    pub fn next(&mut self) -> Option<SimEvent> {
        self.event_queue.pop().map(|scheduled| scheduled.event)
    }

    /// Timestamp of the earliest event without removing it
    pub fn peek_time(&self) -> Option<f64> {
        self.event_queue.peek().map(|scheduled| scheduled.time)
    }

    /// Check if there are any events remaining in the queue
    pub fn has_events(&self) -> bool {
        !self.event_queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.event_queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.event_queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::product::ProductId;

    #[test]
    fn test_events_pop_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(SimEvent::start_process(5.0, ProductId(0)));
        scheduler.schedule(SimEvent::start_process(1.0, ProductId(1)));
        scheduler.schedule(SimEvent::start_process(3.0, ProductId(2)));

        assert_eq!(scheduler.next().unwrap().time, 1.0);
        assert_eq!(scheduler.next().unwrap().time, 3.0);
        assert_eq!(scheduler.next().unwrap().time, 5.0);
        assert!(scheduler.next().is_none());
    }

    #[test]
    fn test_ties_resolve_in_insertion_order() {
        let mut scheduler = EventScheduler::new();
        for i in 0..5 {
            scheduler.schedule(SimEvent::start_process(2.0, ProductId(i)));
        }

        for i in 0..5 {
            assert_eq!(scheduler.next().unwrap().product, Some(ProductId(i)));
        }
    }

    #[test]
    fn test_peek_does_not_remove() {
        let mut scheduler = EventScheduler::new();
        assert_eq!(scheduler.peek_time(), None);

        scheduler.schedule(SimEvent::start_process(7.5, ProductId(0)));
        assert_eq!(scheduler.peek_time(), Some(7.5));
        assert_eq!(scheduler.len(), 1);
        assert!(scheduler.has_events());
    }
}
