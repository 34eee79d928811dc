//! Filter → search → sort over the loaded directory.

use tracing::debug;

use crate::doctor::Doctor;
use crate::query::{QueryState, SortKey};

/// Apply `state` to `doctors` and return the visible doctors in display order.
///
/// Steps, in order: name search, consultation filter, specialty filter, sort.
/// Sorting is stable, so doctors with equal keys keep their load order. The
/// input slice is never reordered.
pub fn apply<'a>(doctors: &'a [Doctor], state: &QueryState) -> Vec<&'a Doctor> {
    let needle = state.search_text.to_lowercase();
    let mode = state.consultation.mode();

    let mut visible: Vec<&Doctor> = doctors
        .iter()
        .filter(|d| needle.is_empty() || name_matches(d, &needle))
        .filter(|d| mode.is_none_or(|m| d.offers(m)))
        .filter(|d| {
            state.specialties.is_empty() || d.has_specialty_where(|s| state.specialties.contains(s))
        })
        .collect();

    match state.sort {
        SortKey::None => {}
        SortKey::Fee => visible.sort_by_key(|d| d.fee_amount),
        SortKey::Experience => {
            visible.sort_by(|a, b| b.experience_years.cmp(&a.experience_years))
        }
    }

    debug!(total = doctors.len(), visible = visible.len(), "applied query");
    visible
}

/// Case-insensitive substring match on the doctor's name.
///
/// `needle` must already be lowercased.
pub(crate) fn name_matches(doctor: &Doctor, needle: &str) -> bool {
    doctor.name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctor::ConsultationMode;
    use crate::normalize::{RawRecord, normalize};
    use crate::query::{ConsultationFilter, QueryUpdate};
    use serde_json::json;

    fn doctor(id: u64, name: &str, fee: u64, exp: u64, specialties: &[&str]) -> Doctor {
        Doctor {
            id,
            name: name.into(),
            fee_amount: fee,
            experience_years: exp,
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn ids(visible: &[&Doctor]) -> Vec<u64> {
        visible.iter().map(|d| d.id).collect()
    }

    fn sample() -> Vec<Doctor> {
        vec![
            doctor(1, "Dr. Asha Rao", 500, 5, &["Dentist"]),
            doctor(2, "Dr. Vikram Mehta", 300, 12, &["General Physician", "Dentist"]),
            doctor(3, "Dr. Rahul Rao", 800, 12, &["Dermatologist"]),
            doctor(4, "Dr. Neha Kapoor", 300, 2, &["ENT"]),
        ]
    }

    #[test]
    fn default_state_keeps_everything_in_order() {
        let doctors = sample();
        assert_eq!(ids(&apply(&doctors, &QueryState::default())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let doctors = sample();
        let state = QueryState::default().merge(QueryUpdate::search("RAO"));
        assert_eq!(ids(&apply(&doctors, &state)), vec![1, 3]);
    }

    #[test]
    fn specialty_filter_matches_any_selected() {
        let doctors = sample();
        let state = QueryState::default()
            .toggle_specialty("Dentist")
            .toggle_specialty("ENT");
        assert_eq!(ids(&apply(&doctors, &state)), vec![1, 2, 4]);
    }

    #[test]
    fn fee_sort_is_ascending_and_stable() {
        let doctors = sample();
        let state = QueryState::default().merge(QueryUpdate::sort(SortKey::Fee));
        // 2 and 4 share fee 300 and keep load order.
        assert_eq!(ids(&apply(&doctors, &state)), vec![2, 4, 1, 3]);
    }

    #[test]
    fn experience_sort_is_descending_and_stable() {
        let doctors = sample();
        let state = QueryState::default().merge(QueryUpdate::sort(SortKey::Experience));
        assert_eq!(ids(&apply(&doctors, &state)), vec![2, 3, 1, 4]);
    }

    #[test]
    fn equal_fees_keep_relative_order() {
        let doctors = vec![doctor(10, "A", 10, 0, &[]), doctor(11, "B", 10, 0, &[])];
        let state = QueryState::default().merge(QueryUpdate::sort(SortKey::Fee));
        assert_eq!(ids(&apply(&doctors, &state)), vec![10, 11]);
    }

    #[test]
    fn apply_is_deterministic_and_leaves_input_alone() {
        let doctors = sample();
        let before = doctors.clone();
        let state = QueryState::default()
            .merge(QueryUpdate::sort(SortKey::Fee))
            .toggle_specialty("Dentist");
        let first = ids(&apply(&doctors, &state));
        let second = ids(&apply(&doctors, &state));
        assert_eq!(first, second);
        assert_eq!(doctors, before);
    }

    #[test]
    fn filter_order_does_not_change_the_set() {
        let doctors = sample();
        let state = QueryState::default()
            .merge(QueryUpdate::search("dr"))
            .toggle_specialty("Dentist")
            .merge(QueryUpdate::sort(SortKey::Fee));

        // Specialty first, then search, then sort the subset directly.
        let mut manual: Vec<&Doctor> = doctors
            .iter()
            .filter(|d| d.specialties.iter().any(|s| s == "Dentist"))
            .filter(|d| name_matches(d, "dr"))
            .collect();
        manual.sort_by_key(|d| d.fee_amount);

        assert_eq!(ids(&apply(&doctors, &state)), ids(&manual));
    }

    #[test]
    fn end_to_end_from_raw_records() {
        let doctors: Vec<Doctor> = [
            json!({ "id": 1, "name": "Dr. A", "fees": "500", "experience": "5 years", "video_consult": true }),
            json!({ "id": 2, "name": "Dr. B", "fees": "300", "experience": "10 years", "in_clinic": true }),
        ]
        .into_iter()
        .filter_map(RawRecord::from_value)
        .map(|raw| normalize(&raw))
        .collect();

        let by_fee = QueryState::default().merge(QueryUpdate::sort(SortKey::Fee));
        let visible = apply(&doctors, &by_fee);
        assert_eq!(
            visible.iter().map(|d| (d.name.as_str(), d.fee_amount)).collect::<Vec<_>>(),
            vec![("Dr. B", 300), ("Dr. A", 500)]
        );

        let video = QueryState::default()
            .merge(QueryUpdate::consultation(ConsultationFilter::VideoConsult));
        let visible = apply(&doctors, &video);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Dr. A");
        assert!(visible[0].offers(ConsultationMode::VideoConsult));
    }
}
