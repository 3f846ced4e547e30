// Error codes implementation
// Stable codes returned in the `error_code` field of API error bodies

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MALFORMED_BODY: &str = "VALIDATION_1002";
}

pub mod resource {
    pub const NOT_FOUND: &str = "NOT_FOUND_2001";
}

pub mod routing {
    pub const METHOD_NOT_ALLOWED: &str = "ROUTING_3001";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
    pub const QUERY_FAILED: &str = "DB_4002";
    pub const CONSTRAINT_VIOLATION: &str = "DB_4003";
}
