use serde::{Deserialize, Serialize};

/// A hydrated event row.
///
/// Every column is kept as text exactly as the store returned it; numeric
/// columns such as `seats_sold` are only parsed where an aggregate needs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub event_id: String,
    pub name: String,
    pub subtitle: String,
    pub user_id: String,
    pub user_name: String,
    pub datetime: String,
    pub venue_name: String,
    pub address: String,
    pub seats_sold: String,
    pub seats_max: String,
}

impl EventRecord {
    /// Columns written for one event in a CSV export. `seats_max` is left out.
    pub fn export_row(&self) -> [&str; 9] {
        [
            self.event_id.as_str(),
            self.name.as_str(),
            self.subtitle.as_str(),
            self.user_id.as_str(),
            self.user_name.as_str(),
            self.datetime.as_str(),
            self.venue_name.as_str(),
            self.address.as_str(),
            self.seats_sold.as_str(),
        ]
    }
}

/// The free-text columns of one event used for keyphrase extraction.
/// NULL columns are read as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventText {
    pub name: String,
    pub venue_name: String,
    pub description: String,
    pub subtitle: String,
}
