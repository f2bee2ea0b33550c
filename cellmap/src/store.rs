use crate::model::{PointId, Vec2};

/// Ordered point collection. Ids come from a counter that only grows, so an
/// id stays attached to its point until that point is removed and is never
/// handed out again.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<(PointId, Vec2)>, // insertion order
    issued: u64,
}

impl PointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends without validation; duplicates and out-of-bounds points are kept.
    /// `None` once every id has been handed out.
    pub fn add(&mut self, p: Vec2) -> Option<PointId> {
        let id = PointId::try_from(self.issued).ok()?;
        self.issued += 1;
        self.points.push((id, p));
        Some(id)
    }

    /// Removes the point with `id`. Stale ids are a no-op returning `None`.
    pub fn remove(&mut self, id: PointId) -> Option<Vec2> {
        let idx = self.index_of(id)?;
        Some(self.points.remove(idx).1)
    }

    /// Empties the store. The id counter keeps counting.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn get(&self, id: PointId) -> Option<Vec2> {
        self.index_of(id).map(|i| self.points[i].1)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.index_of(id).is_some()
    }

    /// True when `id` was handed out at some point, removed or not.
    pub fn was_issued(&self, id: PointId) -> bool {
        u64::from(id) < self.issued
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(PointId, Vec2)] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, Vec2)> + '_ {
        self.points.iter().copied()
    }

    // Ids are pushed in increasing order, so the vector stays sorted by id.
    fn index_of(&self, id: PointId) -> Option<usize> {
        self.points.binary_search_by_key(&id, |(pid, _)| *pid).ok()
    }
}
