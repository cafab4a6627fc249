pub mod test_auth;
pub mod test_concurrency;
