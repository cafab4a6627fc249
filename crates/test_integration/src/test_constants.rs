pub const OWNER_EMAIL: &str = "a@x.com";
pub const OWNER_NAME: &str = "Alice";
pub const COLLABORATOR_EMAIL: &str = "b@x.com";
pub const COLLABORATOR_NAME: &str = "Bob";
pub const STRANGER_EMAIL: &str = "c@x.com";
pub const STRANGER_NAME: &str = "Carol";
pub const PASSWORD: &str = "pw123456";

pub const LAKE_TRIP: &str = "Lake Trip 2025";
pub const LAKE_TRIP_SLUG: &str = "lake-trip-2025";
