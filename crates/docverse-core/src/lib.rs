//! Docverse core: practitioner records, normalisation, and the query pipeline.

pub mod doctor;
pub mod normalize;
pub mod pipeline;
pub mod query;
pub mod session;
pub mod suggest;
pub mod url_codec;

pub use doctor::{
    Clinic, ClinicAddress, ConsultationMode, Doctor, details_path, parse_details_path,
};
pub use normalize::{RawRecord, normalize, parse_digits};
pub use query::{ConsultationFilter, QueryState, QueryUpdate, SortKey, SpecialtySet, UnknownValue};
pub use session::{LoadState, LoadTicket, Location, MemoryLocation, Session};
pub use suggest::{MAX_SUGGESTIONS, available_specialties, suggest};
pub use url_codec::QueryParams;
