//! Canonical practitioner record shared by every downstream component.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path prefix for the details view; the doctor id is the final segment.
pub const DETAILS_PATH_PREFIX: &str = "/doctor/";

/// How a doctor can be consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    #[serde(rename = "Video Consult")]
    VideoConsult,
    #[serde(rename = "In Clinic")]
    InClinic,
}

impl ConsultationMode {
    /// Label used both for display and as the `consultation` URL value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VideoConsult => "Video Consult",
            Self::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicAddress {
    pub address_line1: String,
    pub locality: String,
    pub city: String,
    pub location: String,
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub name: String,
    pub address: ClinicAddress,
}

/// A practitioner as listed in the directory.
///
/// Built from an untrusted upstream record by [`normalize`](crate::normalize);
/// every field has a defined default so construction never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u64,
    pub name: String,
    /// Avatar text shown when there is no photo.
    pub name_initials: String,
    pub photo_url: String,
    pub introduction: String,
    pub specialties: Vec<String>,
    pub fee_amount: u64,
    pub experience_years: u64,
    #[serde(default)]
    pub languages: Vec<String>,
    pub clinic: Option<Clinic>,
    /// Ordered `[VideoConsult, InClinic]` when both are offered.
    pub consultation_modes: Vec<ConsultationMode>,
}

impl Doctor {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    /// True when any of this doctor's specialties satisfies `pred`.
    pub fn has_specialty_where(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
        self.specialties.iter().any(|s| pred(s))
    }

    /// Path of this doctor's details view.
    pub fn details_path(&self) -> String {
        details_path(self.id)
    }
}

/// Build the details path for a doctor id, e.g. `/doctor/42`.
pub fn details_path(id: u64) -> String {
    format!("{DETAILS_PATH_PREFIX}{id}")
}

/// Extract the doctor id from a details path. Returns `None` for any other path.
pub fn parse_details_path(path: &str) -> Option<u64> {
    path.strip_prefix(DETAILS_PATH_PREFIX)?
        .trim_end_matches('/')
        .parse()
        .ok()
}
