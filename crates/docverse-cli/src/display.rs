//! Terminal rendering for doctor listings and detail cards.

use docverse_core::{Doctor, SpecialtySet};

const MAX_LIST_ITEMS: usize = 10;
const LABEL_WIDTH: usize = 20;

// ── Public API ──

/// Print a single doctor as a vertical card grouped into sections.
pub fn print_doctor_card(doctor: &Doctor) {
    println!("=== {} ===", doctor.name);
    if !doctor.introduction.is_empty() {
        println!("{}", doctor.introduction);
    }
    println!();

    print_section(
        "Profile",
        &[
            ("id", doctor.id.to_string()),
            ("details", doctor.details_path()),
            ("avatar", avatar(doctor)),
            ("specialties", join_limited(&doctor.specialties)),
            ("experience", format!("{} years", doctor.experience_years)),
            ("fee", format!("₹{}", doctor.fee_amount)),
            ("languages", join_limited(&doctor.languages)),
        ],
    );
    print_section("Consultation", &[("modes", modes(doctor))]);

    if let Some(clinic) = &doctor.clinic {
        let address = [
            clinic.address.address_line1.as_str(),
            clinic.address.locality.as_str(),
            clinic.address.city.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
        print_section(
            "Clinic",
            &[("name", clinic.name.clone()), ("address", address)],
        );
    }
}

/// Print the "not found" state for a details lookup.
pub fn print_not_found(id: u64) {
    println!("Doctor {id} not found.");
    println!("Back to listing: /");
}

/// Print one row per visible doctor.
pub fn print_listing(doctors: &[&Doctor]) {
    if doctors.is_empty() {
        println!("No doctors match the current filters.");
        return;
    }
    for doctor in doctors {
        println!(
            "{:<8} {:<28} {:>6}  {:>3} yrs  {}",
            doctor.id,
            truncate(&doctor.name, 28),
            format!("₹{}", doctor.fee_amount),
            doctor.experience_years,
            doctor.specialties.join(", "),
        );
        let modes = modes(doctor);
        if !modes.is_empty() {
            println!("{:<8} {}", "", modes);
        }
    }
    println!();
    println!("{} doctor(s)", doctors.len());
}

/// Print the active query as a short summary line.
pub fn print_query_summary(href: &str, specialties: &SpecialtySet) {
    println!("URL: {href}");
    if !specialties.is_empty() {
        println!("Specialties: {specialties}");
    }
    println!();
}

pub fn print_lines<'a>(lines: impl IntoIterator<Item = &'a str>) {
    for line in lines {
        println!("{line}");
    }
}

// ── Section rendering ──

fn print_section(header: &str, rows: &[(&str, String)]) {
    if rows.iter().all(|(_, value)| value.is_empty()) {
        return;
    }
    println!("{header}");
    for (label, value) in rows {
        if value.is_empty() {
            continue;
        }
        println!("  {:<width$} {}", label, value, width = LABEL_WIDTH);
    }
    println!();
}

// ── Helpers ──

/// Photo URL, or the initials shown in its place.
fn avatar(doctor: &Doctor) -> String {
    if doctor.photo_url.is_empty() {
        doctor.name_initials.clone()
    } else {
        doctor.photo_url.clone()
    }
}

fn modes(doctor: &Doctor) -> String {
    doctor
        .consultation_modes
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_limited(items: &[String]) -> String {
    let shown = items
        .iter()
        .take(MAX_LIST_ITEMS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > MAX_LIST_ITEMS {
        format!("{shown} ... and {} more", items.len() - MAX_LIST_ITEMS)
    } else {
        shown
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max - 3).collect();
    format!("{cut}...")
}
