//! URL handling module for Automobile
//!
//! Canonical URLs are the only identity the article cache knows about, so
//! every URL read from the input list passes through [`canonicalize`] before
//! it is looked up or fetched.

mod canonicalize;

pub use canonicalize::{canonicalize, is_tracking_param, TRACKING_PARAMS};
