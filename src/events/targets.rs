//! Name resolution: which live objects an event or action addresses.
//!
//! Rules address objects by name, and names are shared. Two matching modes:
//!
//! - **Plain** (no related objects): every live object with the name, in
//!   collection order. Used to pick the objects whose condition is checked.
//! - **Related-biased** (with the participants of a fired event): the
//!   participants come first, then the other same-named objects that aren't
//!   the primary participant or its direct duplicates. If nothing matched,
//!   fall back to the primary participant's own name group. Used to pick
//!   action targets.
//!
//! The biased mode only ever looks at the first two participants.

use smallvec::SmallVec;

use crate::core::ObjectId;
use crate::objects::World;

/// Objects involved in a fired event: the object itself, plus the other
/// object for pairwise conditions (overlap).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participants(SmallVec<[ObjectId; 2]>);

impl Participants {
    /// A condition that involves only the checked object.
    #[must_use]
    pub fn single(id: ObjectId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(id);
        Self(ids)
    }

    /// A pairwise condition.
    #[must_use]
    pub fn pair(primary: ObjectId, other: ObjectId) -> Self {
        let mut ids = SmallVec::new();
        ids.push(primary);
        ids.push(other);
        Self(ids)
    }

    /// The object whose condition fired.
    #[must_use]
    pub fn primary(&self) -> ObjectId {
        self.0[0]
    }

    /// The other object of a pairwise condition.
    #[must_use]
    pub fn secondary(&self) -> Option<ObjectId> {
        self.0.get(1).copied()
    }

    /// Participants in order.
    #[must_use]
    pub fn as_slice(&self) -> &[ObjectId] {
        &self.0
    }

    /// Capture each participant's current name, keeping positions.
    ///
    /// A participant that is no longer live keeps its slot with no name.
    #[must_use]
    pub fn resolve(&self, world: &World) -> Vec<Related> {
        self.0
            .iter()
            .map(|&id| Related {
                id,
                name: world.core(id).map(|core| core.name.clone()),
            })
            .collect()
    }
}

/// A participant with its name captured when the event fired.
///
/// The name is kept so the fallback group stays stable even if the
/// participant is destroyed by an earlier action of the same rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Related {
    pub id: ObjectId,
    pub name: Option<String>,
}

impl Related {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}

/// Resolve the objects addressed by `name`.
///
/// With `related` absent (or empty) this is the plain match. Otherwise the
/// related-biased match, in this precedence:
///
/// 1. `related[0]`, if its name is `name`
/// 2. `related[1]`, if present and its name is `name`
/// 3. every live object named `name` that is neither `related[0]` nor a
///    direct duplicate of it
/// 4. if still empty: every live object named like `related[0]`, if it was
///    live when the event fired
///
/// No further de-duplication is done: a second participant that also
/// qualifies in step 3 appears twice.
#[must_use]
pub fn find_targets(world: &World, name: &str, related: Option<&[Related]>) -> Vec<ObjectId> {
    let Some(first) = related.and_then(<[Related]>::first) else {
        return world.named(name);
    };
    let related = related.unwrap_or_default();

    let mut targets = Vec::new();
    if first.is_named(name) {
        targets.push(first.id);
    }
    if let Some(second) = related.get(1) {
        if second.is_named(name) {
            targets.push(second.id);
        }
    }
    targets.extend(
        world
            .iter()
            .filter(|c| c.name == name && c.id() != first.id && !c.is_duplicate_of(first.id))
            .map(|c| c.id()),
    );

    if targets.is_empty() {
        if let Some(first_name) = &first.name {
            targets = world.named(first_name);
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vec2;
    use crate::objects::behavior::Inert;

    fn spawn(world: &mut World, name: &str) -> ObjectId {
        world.spawn("Inert", name, Vec2::ZERO, Box::new(Inert))
    }

    fn related(world: &World, ids: &[ObjectId]) -> Vec<Related> {
        let participants = match ids {
            [a] => Participants::single(*a),
            [a, b] => Participants::pair(*a, *b),
            _ => unreachable!(),
        };
        participants.resolve(world)
    }

    #[test]
    fn test_plain_match_in_collection_order() {
        let mut world = World::new();
        let a = spawn(&mut world, "enemy");
        let _b = spawn(&mut world, "wall");
        let c = spawn(&mut world, "enemy");

        assert_eq!(find_targets(&world, "enemy", None), vec![a, c]);
        assert!(find_targets(&world, "ghost", None).is_empty());
    }

    #[test]
    fn test_empty_related_is_plain() {
        let mut world = World::new();
        let a = spawn(&mut world, "enemy");
        assert_eq!(find_targets(&world, "enemy", Some(&[])), vec![a]);
    }

    #[test]
    fn test_primary_participant_first() {
        let mut world = World::new();
        let a = spawn(&mut world, "enemy");
        let b = spawn(&mut world, "enemy");
        let rel = related(&world, &[b]);

        assert_eq!(find_targets(&world, "enemy", Some(&rel)), vec![b, a]);
    }

    #[test]
    fn test_duplicates_of_primary_excluded_from_scan() {
        let mut world = World::new();
        let original = spawn(&mut world, "enemy");
        let dup = spawn(&mut world, "enemy");
        let other = spawn(&mut world, "enemy");
        world.set_duplicate(dup, original);

        let rel = related(&world, &[original]);
        assert_eq!(find_targets(&world, "enemy", Some(&rel)), vec![original, other]);
    }

    #[test]
    fn test_duplicate_as_participant_still_included() {
        let mut world = World::new();
        let original = spawn(&mut world, "enemy");
        let dup = spawn(&mut world, "enemy");
        let player = spawn(&mut world, "player");
        world.set_duplicate(dup, original);

        // The player collided with the duplicate: [player, dup].
        let rel = related(&world, &[player, dup]);
        let targets = find_targets(&world, "enemy", Some(&rel));
        // dup from step 2, then original and dup again from step 3.
        assert_eq!(targets, vec![dup, original, dup]);
    }

    #[test]
    fn test_second_participant() {
        let mut world = World::new();
        let player = spawn(&mut world, "player");
        let coin = spawn(&mut world, "coin");
        let rel = related(&world, &[player, coin]);

        assert_eq!(find_targets(&world, "coin", Some(&rel)), vec![coin, coin]);
        assert_eq!(find_targets(&world, "player", Some(&rel)), vec![player]);
    }

    #[test]
    fn test_fallback_to_primary_name_group() {
        let mut world = World::new();
        let a = spawn(&mut world, "enemy");
        let b = spawn(&mut world, "enemy");
        let _w = spawn(&mut world, "wall");
        let rel = related(&world, &[a]);

        assert_eq!(find_targets(&world, "ghost", Some(&rel)), vec![a, b]);
    }

    #[test]
    fn test_fallback_uses_captured_name() {
        let mut world = World::new();
        let a = spawn(&mut world, "enemy");
        let b = spawn(&mut world, "enemy");
        let rel = related(&world, &[a]);
        world.remove(a);

        assert_eq!(find_targets(&world, "ghost", Some(&rel)), vec![b]);
    }

    #[test]
    fn test_dead_participant_keeps_its_slot() {
        let mut world = World::new();
        let player = spawn(&mut world, "player");
        let coin = spawn(&mut world, "coin");
        let other = spawn(&mut world, "coin");
        world.remove(player);

        let rel = related(&world, &[player, coin]);
        assert_eq!(rel[0], Related { id: player, name: None });
        assert_eq!(rel[1], Related::new(coin, "coin"));

        // Still the biased match: the second participant leads.
        assert_eq!(find_targets(&world, "coin", Some(&rel)), vec![coin, coin, other]);
        // No primary name to fall back on.
        assert!(find_targets(&world, "ghost", Some(&rel)).is_empty());
    }

    #[test]
    fn test_participants_accessors() {
        let p = Participants::pair(ObjectId(1), ObjectId(2));
        assert_eq!(p.primary(), ObjectId(1));
        assert_eq!(p.secondary(), Some(ObjectId(2)));
        assert_eq!(Participants::single(ObjectId(3)).secondary(), None);
    }
}
