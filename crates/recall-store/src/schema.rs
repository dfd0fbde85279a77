//! Key namespaces.
//!
//! Every key is `<namespace>:<segment>[:<segment>]`. The namespaces are
//! shared with data written by earlier deployments and must stay bit-exact.

/// Key namespace prefixes.
pub mod ns {
    /// Daily score records, `memory:score:<user_id>:<YYYY-MM-DD>`.
    pub const SCORE: &str = "memory:score";

    /// Month indexes, `memory:score-index:<user_id>:<YYYY-MM>`.
    /// Value is a JSON array of date strings.
    pub const SCORE_INDEX: &str = "memory:score-index";

    /// Account records, `memory:user:<lower-cased email>`.
    pub const USER: &str = "memory:user";
}

/// Separator between key segments.
pub const SEPARATOR: char = ':';
