//! Client constants
//!
//! Centralized location for the fixed tokens the backend expects: token
//! endpoint defaults, page sizes and responsibility-code tables.

// Configuration defaults
pub const DEFAULT_TOKEN_URL: &str =
    "https://login.microsoftonline.com/momentumb2c.onmicrosoft.com/oauth2/token";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_REFRESH_MARGIN_SECS: u64 = 300;

// Paged endpoints (page size, safety ceiling on page number)
pub const CITIZEN_SEARCH_PAGE_SIZE: u32 = 100;
pub const CITIZEN_SEARCH_MAX_PAGES: u32 = 20;
pub const PRODUCTION_UNIT_PAGE_SIZE: u32 = 6000;
pub const PRODUCTION_UNIT_MAX_PAGES: u32 = 110;
pub const TASK_PAGE_SIZE: u32 = 150;
pub const TASK_MAX_PAGES: u32 = 50;

// Global search
pub const GLOBAL_SEARCH_SIZE: u32 = 15;
pub const ALL_SEARCH_CATEGORIES: &[&str] =
    &["Citizen", "Company", "ContactPerson", "Caseworker", "Offer", "JobOrder", "JobAd", "Course"];

// Contact person / caseworker listings on production units
pub const CONTACT_DEFAULT_PAGE_SIZE: u32 = 999_999;

/// Tag looked up when callers do not name one.
pub const DEFAULT_TAG_TITLE: &str = "ØF-JC-AC-IT-emnebank";

/// Responsibility code used for caseworker entries whose name is not in
/// [`CASEWORKER_RESPONSIBILITIES`].
pub const DEFAULT_RESPONSIBILITY_CODE: &str = "OVRIG_ANSVARLIG";

/// Responsibility name to code for the caseworker bucket.
pub const CASEWORKER_RESPONSIBILITIES: &[(&str, &str)] = &[
    ("Jobkonsulent", "CASEWORKER_RESPONSIBILITY_JOBKONSULENT"),
    ("Virksomhedskonsulent", "CASEWORKER_RESPONSIBILITY_VIRKSOMHEDSKONSULENT"),
    ("Ydelsesrådgiver", "CASEWORKER_RESPONSIBILITY_YDELSESRAADGIVER"),
    ("Sygedagpengerådgiver", "CASEWORKER_RESPONSIBILITY_SYGEDAGPENGERAADGIVER"),
    ("Mentor", "CASEWORKER_RESPONSIBILITY_MENTOR"),
    ("Uddannelsesvejleder", "CASEWORKER_RESPONSIBILITY_UDDANNELSESVEJLEDER"),
    ("Rehabiliteringskoordinator", "CASEWORKER_RESPONSIBILITY_REHABILITERINGSKOORDINATOR"),
    ("Øvrig ansvarlig", DEFAULT_RESPONSIBILITY_CODE),
];

/// Responsibility name to code for the private-contact bucket. Closed set:
/// a name outside this table is a configuration error.
///
/// The codes are placeholders, not tenant values. Replace them with the
/// identifiers the target Momentum tenant uses before going to production.
pub const PRIVATE_CONTACT_RESPONSIBILITIES: &[(&str, &str)] = &[
    ("Bisidder", "3b0f2a6e-6c1d-4f7e-9a52-0d9c1b7e4a10"),
    ("Partsrepræsentant", "8e4c7d21-52a9-4b3f-8f61-2a7c9e5d1b33"),
    ("Nexus-sagsbehandler", "c5a19f04-7e2b-4d88-b1c6-9f3e2d7a6b55"),
    ("DUBU-sagsbehandler", "f27d8b93-1a4e-4c65-a0d7-5e8b3c2f9d77"),
];
