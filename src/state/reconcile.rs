use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::types::Prop;

/// Dedup key: one canonical prop per (player, prop type).
type PropKey = (String, String);

fn prop_key(prop: &Prop) -> PropKey {
    (
        prop.player_id.as_ref().map(|id| id.to_string()).unwrap_or_default(),
        prop.prop_type.clone(),
    )
}

/// Collapse a raw listing into the canonical set.
///
/// The first prop seen for a key claims its slot; a later prop replaces it
/// only when its date is strictly later. Missing or unparseable dates sort
/// before every valid date, so between two undated props the first one seen
/// stays. Output keeps first-occurrence order.
pub fn reconcile(props: Vec<Prop>) -> Vec<Prop> {
    let input_len = props.len();
    let mut slots: HashMap<PropKey, usize> = HashMap::with_capacity(input_len);
    let mut canonical: Vec<(Option<DateTime<Utc>>, Prop)> = Vec::with_capacity(input_len);

    for prop in props {
        let ts = prop.timestamp();
        match slots.get(&prop_key(&prop)) {
            Some(&idx) => {
                // Option orders None below every Some.
                if ts > canonical[idx].0 {
                    canonical[idx] = (ts, prop);
                }
            }
            None => {
                slots.insert(prop_key(&prop), canonical.len());
                canonical.push((ts, prop));
            }
        }
    }

    debug!(
        raw = input_len,
        canonical = canonical.len(),
        "reconciled prop listing"
    );
    canonical.into_iter().map(|(_, prop)| prop).collect()
}
