// API path and header constants

pub mod registry_api_path {
    /// Listing of advertised services, filtered with `?type=<service-type>`
    pub const SERVICES: &str = "/api/services";
    /// Bulk removal, suffixed with `/<service-type>`
    pub const DEREGISTER: &str = "/api/services/deregister";
}

pub mod registry_header {
    pub const IDENTITY_PUBKEY: &str = "Identity-PubKey";
    pub const IDENTITY_SIGN: &str = "Identity-Sign";
}

pub mod participant_api_path {
    pub const ABOUT: &str = "/api/about";
    pub const VISORS: &str = "/api/visors";
}
