/// Position sequencing for ordered sibling groups
///
/// Columns within a board and tasks within a column each form a *sibling
/// group* whose `position` values must stay dense: exactly `0..count`, no gaps,
/// no duplicates. This module plans the position changes needed to keep that
/// true when siblings are appended, removed, moved, or reordered.
///
/// Planning is pure. A plan is a list of [`RangeShift`]s, each of which
/// translates to a single `UPDATE ... SET position = position + delta` over a
/// contiguous range of one group, plus the final [`Slot`] of the moved entity.
/// Applying the plan is the store's job (see `db::positions`), which does it
/// inside one transaction after locking the affected groups.
///
/// # Move semantics
///
/// ```text
/// same group, 3 -> 1:   [a b c D e]  =>  [a D b c e]   (1..=2 shift +1)
/// same group, 1 -> 3:   [a B c d e]  =>  [a c d B e]   (2..=3 shift -1)
/// cross group:          old: everything after the task shifts -1
///                       new: everything at or after the target shifts +1
/// ```
///
/// A target position that is already occupied is taken by the moved entity;
/// the occupant and everything after it move right.
///
/// # Example
///
/// ```
/// use kanban_shared::sequencer::{plan_move, Slot};
/// use uuid::Uuid;
///
/// let column = Uuid::new_v4();
/// let plan = plan_move(
///     Slot::new(column, 3),
///     Slot::new(column, 1),
///     5,
/// ).unwrap();
///
/// assert_eq!(plan.shifts.len(), 1);
/// assert_eq!(plan.shifts[0].start, 1);
/// assert_eq!(plan.shifts[0].end, Some(2));
/// assert_eq!(plan.shifts[0].delta, 1);
/// ```

use std::collections::HashMap;

use uuid::Uuid;

/// Error type for sequencing plans
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// Requested position lies outside the group
    #[error("position {position} is out of range 0..={max}")]
    OutOfRange { position: i32, max: i32 },

    /// A reorder entry names an id outside the group
    #[error("{0} is not a member of this group")]
    UnknownMember(Uuid),

    /// Applying a reorder would leave gaps or duplicates
    #[error("positions must form a permutation of 0..{len}")]
    NotDense { len: usize },
}

/// A position inside a specific sibling group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Parent id of the group (board id for columns, column id for tasks)
    pub group: Uuid,

    /// Zero-based position in the group
    pub position: i32,
}

impl Slot {
    pub fn new(group: Uuid, position: i32) -> Self {
        Self { group, position }
    }
}

/// Adds `delta` to every sibling of `group` whose position is in `start..=end`
///
/// `end: None` means "to the end of the group".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeShift {
    /// Group the shift applies to
    pub group: Uuid,

    /// First affected position (inclusive)
    pub start: i32,

    /// Last affected position (inclusive), unbounded when `None`
    pub end: Option<i32>,

    /// Amount added to each affected position (+1 or -1)
    pub delta: i32,
}

impl RangeShift {
    /// Returns true if a sibling at `slot` is affected by this shift
    pub fn covers(&self, slot: Slot) -> bool {
        slot.group == self.group
            && slot.position >= self.start
            && self.end.map_or(true, |end| slot.position <= end)
    }

    /// Returns the position `slot` ends up at after this shift
    pub fn apply(&self, slot: Slot) -> i32 {
        if self.covers(slot) {
            slot.position + self.delta
        } else {
            slot.position
        }
    }
}

/// Complete plan for moving one entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    /// Where the entity is now
    pub from: Slot,

    /// Where the entity ends up
    pub to: Slot,

    /// Sibling shifts to apply before writing `to`
    pub shifts: Vec<RangeShift>,
}

impl MovePlan {
    /// True when the entity stays where it is
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// True when the entity changes group
    pub fn crosses_groups(&self) -> bool {
        self.from.group != self.to.group
    }
}

/// Position for a new sibling appended at the tail
///
/// Uses the highest observed position rather than the sibling count, so a
/// group with a gap still gets a fresh, non-colliding slot.
pub fn tail_position(max_position: Option<i32>) -> i32 {
    max_position.map_or(0, |max| max + 1)
}

/// Shift that closes the gap left by removing the sibling at `slot`
pub fn plan_removal(slot: Slot) -> RangeShift {
    RangeShift {
        group: slot.group,
        start: slot.position + 1,
        end: None,
        delta: -1,
    }
}

/// Plans moving an entity from `from` to `to`
///
/// `target_len` is the number of siblings currently in `to.group`, counting the
/// moved entity when it already lives there.
///
/// # Errors
///
/// Returns [`SequenceError::OutOfRange`] if `to.position` is negative or past
/// the last valid slot: `target_len - 1` within the same group, `target_len`
/// when entering a new group (appending).
pub fn plan_move(from: Slot, to: Slot, target_len: usize) -> Result<MovePlan, SequenceError> {
    let len = i32::try_from(target_len).unwrap_or(i32::MAX);
    let max = if from.group == to.group { len - 1 } else { len };

    if to.position < 0 || to.position > max {
        return Err(SequenceError::OutOfRange {
            position: to.position,
            max,
        });
    }

    let mut shifts = Vec::with_capacity(2);

    if from.group == to.group {
        if to.position < from.position {
            // Siblings between the target and the old slot make room.
            shifts.push(RangeShift {
                group: from.group,
                start: to.position,
                end: Some(from.position - 1),
                delta: 1,
            });
        } else if to.position > from.position {
            // Siblings between the old slot and the target fill the gap.
            shifts.push(RangeShift {
                group: from.group,
                start: from.position + 1,
                end: Some(to.position),
                delta: -1,
            });
        }
    } else {
        shifts.push(plan_removal(from));
        shifts.push(RangeShift {
            group: to.group,
            start: to.position,
            end: None,
            delta: 1,
        });
    }

    Ok(MovePlan { from, to, shifts })
}

/// Plans a caller-supplied reorder of a whole group
///
/// `current` lists every sibling with its present position; `batch` lists the
/// requested `(id, position)` pairs. Later entries for the same id win. The
/// returned list holds only the siblings whose position actually changes.
///
/// # Errors
///
/// - [`SequenceError::UnknownMember`] if the batch names an id not in `current`
/// - [`SequenceError::NotDense`] if the merged result is not a permutation of
///   `0..current.len()`
pub fn plan_reorder(
    current: &[(Uuid, i32)],
    batch: &[(Uuid, i32)],
) -> Result<Vec<(Uuid, i32)>, SequenceError> {
    let mut merged: HashMap<Uuid, i32> = current.iter().copied().collect();

    for (id, position) in batch {
        match merged.get_mut(id) {
            Some(slot) => *slot = *position,
            None => return Err(SequenceError::UnknownMember(*id)),
        }
    }

    if !is_dense(merged.values().copied()) {
        return Err(SequenceError::NotDense {
            len: current.len(),
        });
    }

    // Keep the caller's group order so updates are issued deterministically.
    Ok(current
        .iter()
        .filter_map(|(id, old)| {
            let new = merged[id];
            (new != *old).then_some((*id, new))
        })
        .collect())
}

/// Returns true when `positions` is exactly `0..n` in some order
pub fn is_dense(positions: impl IntoIterator<Item = i32>) -> bool {
    let mut sorted: Vec<i32> = positions.into_iter().collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(index, position)| i32::try_from(index).map_or(false, |i| i == *position))
}
