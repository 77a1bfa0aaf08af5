// Shared event fixtures. Ids and prices match the documented scenarios:
// a free workshop and a priced summit.

use crate::modules::event_registrations::core::model::EventReference;
use crate::shared::core::primitives::Amount;

pub fn free_event() -> EventReference {
    EventReference {
        id: "e1".into(),
        title: "Workshop".into(),
        price: Amount::ZERO,
    }
}

pub fn priced_event() -> EventReference {
    EventReference {
        id: "e2".into(),
        title: "Summit".into(),
        price: Amount::new(500),
    }
}
