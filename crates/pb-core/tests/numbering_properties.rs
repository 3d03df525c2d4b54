//! Property tests for jersey-number assignment.

use pb_core::model::{Color, EntityModel, Label, Player};
use proptest::prelude::*;

fn palette() -> impl Strategy<Value = Color> {
    prop_oneof![Just(Color::RED), Just(Color::BLACK), Just(Color::ORANGE)]
}

proptest! {
    #[test]
    fn next_number_is_free_and_stable(
        adds in prop::collection::vec((palette(), prop::option::of(1u32..20)), 0..30),
        deletes in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
        queried in palette(),
    ) {
        let mut model = EntityModel::new(400.0, 260.0, 10.0);
        let mut ids = Vec::new();
        for (color, explicit) in adds {
            let player = Player::new(10.0, 10.0, 15.0, color);
            ids.push(model.add_player(player, explicit.map(Label::numbered)));
        }
        for idx in deletes {
            if !ids.is_empty() {
                let id = ids.remove(idx.index(ids.len()));
                model.delete(id);
            }
        }

        let first = model.next_number(queried);
        prop_assert_eq!(first, model.next_number(queried));
        prop_assert!(first >= 1);
        let taken = model
            .scene()
            .players_of(queried)
            .filter_map(|p| model.label(p.id).and_then(|l| l.number))
            .any(|n| n == first);
        prop_assert!(!taken);
    }
}
