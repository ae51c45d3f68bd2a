//! An immutable read view over every Unit in an ASTDB at a point in time
//! (§4.2). Downstream analyses (semantic resolution, dispatch) hold a
//! `Snapshot` rather than the live `AstDb` so a concurrent `add_unit` hot
//! reload can never be observed mid-update.

use lattice_core::{NodeId, UnitId};

use super::node::NodeRecord;
use super::unit::Unit;

pub struct Snapshot<'a> {
    units: &'a [Unit],
}

impl<'a> Snapshot<'a> {
    pub(super) fn new(units: &'a [Unit]) -> Self {
        Self { units }
    }

    pub fn unit(&self, id: UnitId) -> &'a Unit {
        &self.units[id.index()]
    }

    pub fn units(&self) -> impl Iterator<Item = (UnitId, &'a Unit)> {
        self.units.iter().enumerate().map(|(i, u)| (UnitId::new(i as u32), u))
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn node_count(&self) -> usize {
        self.units.iter().map(Unit::node_count).sum()
    }

    pub fn get_node(&self, unit: UnitId, id: NodeId) -> Option<&'a NodeRecord> {
        self.units.get(unit.index())?.nodes.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astdb::AstDb;

    #[test]
    fn snapshot_sees_units_added_before_it_was_taken() {
        let mut db = AstDb::new();
        db.add_unit("a.lat", "let x := 1");
        let snapshot = db.create_snapshot();
        assert_eq!(snapshot.unit_count(), 1);
    }
}
