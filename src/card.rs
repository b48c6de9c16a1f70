use crate::catalog::{display_name, Activity, ActivityCatalog};

pub const NO_PARTICIPANTS: &str = "No participants yet";

#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub label: String,
    pub email: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Roster {
    Empty,
    Members(Vec<ParticipantRow>),
}

/// Everything one activity card displays.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub availability: String,
    pub roster: Roster,
}

impl ActivityCard {
    pub fn build(name: &str, activity: &Activity) -> Self {
        let roster = if activity.participants.is_empty() {
            Roster::Empty
        } else {
            Roster::Members(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        label: display_name(email),
                        email: email.clone(),
                        activity: name.to_string(),
                    })
                    .collect(),
            )
        };

        Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            availability: format!("{} spots left", activity.spots_left()),
            roster,
        }
    }
}

pub fn cards(catalog: &ActivityCatalog) -> Vec<ActivityCard> {
    catalog.iter().map(|(name, a)| ActivityCard::build(name, a)).collect()
}
