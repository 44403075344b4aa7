use serde::{Deserialize, Serialize};

/// A bookable time within a date slot.
///
/// `sold_out` is stored alongside `available` and is never derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub time: String,
    pub available: u32,
    #[serde(default)]
    pub sold_out: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSlot {
    /// Display label such as "Oct 22", not a calendar date.
    pub date: String,
    pub available: u32,
    #[serde(default)]
    pub times: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: i64,
    pub image: String,
    pub description: String,
    pub about: String,
    #[serde(default)]
    pub dates: Vec<DateSlot>,
}

impl Experience {
    pub fn slot(&self, date: &str, time: &str) -> Option<&TimeSlot> {
        self.dates
            .iter()
            .find(|slot| slot.date == date)
            .and_then(|slot| slot.times.iter().find(|t| t.time == time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sold_out_defaults_to_false_when_absent() {
        let slot: TimeSlot =
            serde_json::from_str(r#"{"time":"07:00 am","available":4}"#).expect("valid slot");
        assert!(!slot.sold_out);
        assert_eq!(slot.available, 4);
    }

    #[test]
    fn sold_out_is_kept_independent_of_available() {
        let slot: TimeSlot =
            serde_json::from_str(r#"{"time":"1:00 pm","available":3,"soldOut":true}"#)
                .expect("valid slot");
        assert!(slot.sold_out);
        assert_eq!(slot.available, 3);
    }

    #[test]
    fn slot_lookup_matches_date_and_time_labels() {
        let experience = Experience {
            id: "boat-cruise".into(),
            title: "Boat Cruise".into(),
            location: "Sunderban".into(),
            price: 999,
            image: "/images/boat-cruise.jpg".into(),
            description: String::new(),
            about: String::new(),
            dates: vec![DateSlot {
                date: "Oct 22".into(),
                available: 12,
                times: vec![TimeSlot {
                    time: "10:00 am".into(),
                    available: 12,
                    sold_out: false,
                }],
            }],
        };

        assert_eq!(
            experience.slot("Oct 22", "10:00 am").map(|t| t.available),
            Some(12)
        );
        assert!(experience.slot("Oct 23", "10:00 am").is_none());
        assert!(experience.slot("Oct 22", "03:00 pm").is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let slot = TimeSlot {
            time: "07:00 am".into(),
            available: 0,
            sold_out: true,
        };
        let value = serde_json::to_value(&slot).expect("serializable");
        assert_eq!(value["soldOut"], serde_json::json!(true));
    }
}
