//! The event grid: a frame's ordered rule table and its per-step evaluation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::HaltResult;
use crate::runtime::Stage;

use super::rule::{Action, Event, Rule};
use super::targets::find_targets;

/// Ordered mapping from events to the actions bound to them.
///
/// Declaration order is evaluation order. Serialized as a list of
/// `[event, [action, ...]]` pairs.
///
/// ## Example
///
/// ```
/// use rust_mmf::events::{Action, Event, EventGrid};
///
/// let mut grid = EventGrid::new();
/// grid.insert(
///     Event::new("Collision", "player").with_arg("enemy"),
///     vec![Action::destroy("enemy")],
/// );
/// grid.insert(Event::new("Frame start", "game"), vec![]);
///
/// assert_eq!(grid.len(), 2);
/// assert_eq!(grid.rules()[0].event.name, "Collision");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<(Event, Vec<Action>)>", into = "Vec<(Event, Vec<Action>)>")]
pub struct EventGrid {
    rules: Vec<Rule>,
}

impl EventGrid {
    /// Create an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind actions to an event.
    ///
    /// An event equal to one already in the grid keeps its position and has
    /// its actions replaced.
    pub fn insert(&mut self, event: Event, actions: Vec<Action>) {
        match self.rules.iter_mut().find(|r| r.event == event) {
            Some(rule) => rule.actions = actions,
            None => self.rules.push(Rule { event, actions }),
        }
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.insert(rule.event, rule.actions);
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the grid has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate every rule once against the live objects.
    ///
    /// For each rule in order, the event's condition is checked on every live
    /// object with the event's target name. Each firing dispatches the bound
    /// actions, in order, to the targets resolved with the firing's
    /// participants. Targets are resolved against the current live set every
    /// time, so objects created or destroyed by an action are seen by the
    /// next action. Objects destroyed before their turn are skipped.
    pub fn tick(&self, stage: &mut Stage<'_>) -> HaltResult<()> {
        for rule in &self.rules {
            let event = &rule.event;
            for id in stage.world().named(&event.target) {
                let Some(participants) = stage.check_event(id, &event.name, &event.arg)? else {
                    continue;
                };
                trace!(event = %event.name, target = %event.target, object = %id, "event fired");

                let related = participants.resolve(stage.world());
                for action in &rule.actions {
                    for target in find_targets(stage.world(), &action.target, Some(&related)) {
                        trace!(action = %action.name, object = %target, "dispatch");
                        stage.trigger(target, &action.name, &action.value)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<(Event, Vec<Action>)>> for EventGrid {
    fn from(pairs: Vec<(Event, Vec<Action>)>) -> Self {
        let mut grid = Self::new();
        for (event, actions) in pairs {
            grid.insert(event, actions);
        }
        grid
    }
}

impl From<EventGrid> for Vec<(Event, Vec<Action>)> {
    fn from(grid: EventGrid) -> Self {
        grid.rules.into_iter().map(|r| (r.event, r.actions)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_order_preserved() {
        let grid = EventGrid::new()
            .with_rule(Rule::new(Event::new("b", "x")))
            .with_rule(Rule::new(Event::new("a", "x")))
            .with_rule(Rule::new(Event::new("c", "x")));

        let names: Vec<_> = grid.rules().iter().map(|r| r.event.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_equal_event_replaces_actions_in_place() {
        let mut grid = EventGrid::new();
        grid.insert(Event::new("Frame start", "game"), vec![Action::new("A", "x")]);
        grid.insert(Event::new("Timer expired", "game").with_arg(0), vec![]);
        grid.insert(Event::new("Frame start", "game"), vec![Action::new("B", "x")]);

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.rules()[0].actions, vec![Action::new("B", "x")]);
    }

    #[test]
    fn test_same_name_different_arg_are_distinct() {
        let mut grid = EventGrid::new();
        grid.insert(Event::new("Key pressed", "input").with_arg("a"), vec![]);
        grid.insert(Event::new("Key pressed", "input").with_arg("b"), vec![]);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_deserialize_pairs() {
        let json = r#"[
            [{"name": "Collision", "objname": "player", "arg": "enemy"},
             [{"name": "Destroy", "objname": "enemy", "value": null},
              {"name": "Move", "objname": "player", "value": [0, 0]}]],
            [{"name": "Frame start", "objname": "game", "arg": null}, []]
        ]"#;
        let grid: EventGrid = serde_json::from_str(json).unwrap();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid.rules()[0].actions.len(), 2);
        assert!(grid.rules()[0].actions[0].is_destroy());
        assert!(grid.rules()[1].actions.is_empty());
    }
}
