//! Event status against an elapsed mission clock.

use crate::models::{EventStatus, TimelineEvent, TimelineResult};
use crate::summary::summarize;

/// Status of `event` once `elapsed_secs` of the mission have passed.
pub fn status_at(event: &TimelineEvent, elapsed_secs: f64) -> EventStatus {
    if event.end_secs() <= elapsed_secs {
        EventStatus::Completed
    } else if event.cumulative_secs <= elapsed_secs {
        EventStatus::InProgress
    } else {
        EventStatus::Pending
    }
}

impl TimelineResult {
    /// Copy of this timeline with statuses and summary re-derived for
    /// `elapsed_secs`. The original timeline is left untouched.
    pub fn at_elapsed(&self, elapsed_secs: f64) -> TimelineResult {
        let events: Vec<TimelineEvent> = self
            .events
            .iter()
            .map(|event| TimelineEvent {
                status: status_at(event, elapsed_secs),
                ..event.clone()
            })
            .collect();
        let summary = summarize(&events);
        TimelineResult { events, summary }
    }

    /// First event not yet completed at `elapsed_secs`.
    pub fn current_event(&self, elapsed_secs: f64) -> Option<&TimelineEvent> {
        self.events
            .iter()
            .find(|event| status_at(event, elapsed_secs) != EventStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, EventKind};

    fn timeline() -> TimelineResult {
        let mut events = Vec::new();
        let mut clock = 0.0;
        for (id, duration) in [("a", 0.0), ("b", 100.0), ("c", 50.0)] {
            let mut event =
                TimelineEvent::new(id, EventKind::TruckTravel, Coordinate::new(0.0, 0.0), id);
            event.cumulative_secs = clock;
            event.duration_secs = duration;
            clock += duration;
            events.push(event);
        }
        let summary = summarize(&events);
        TimelineResult { events, summary }
    }

    #[test]
    fn statuses_follow_the_clock() {
        let progressed = timeline().at_elapsed(120.0);
        let statuses: Vec<EventStatus> = progressed.events.iter().map(|e| e.status).collect();
        assert_eq!(
            statuses,
            vec![
                EventStatus::Completed,
                EventStatus::Completed,
                EventStatus::InProgress
            ]
        );
        assert_eq!(progressed.summary.completed_events, 2);
    }

    #[test]
    fn fresh_timeline_is_untouched() {
        let original = timeline();
        let _ = original.at_elapsed(1000.0);
        assert!(original
            .events
            .iter()
            .all(|e| e.status == EventStatus::Pending));
        assert_eq!(original.summary.completed_events, 0);
    }

    #[test]
    fn current_event_is_first_unfinished() {
        let timeline = timeline();
        assert_eq!(timeline.current_event(10.0).map(|e| e.id.as_str()), Some("b"));
        assert!(timeline.current_event(150.0).is_none());
    }
}
