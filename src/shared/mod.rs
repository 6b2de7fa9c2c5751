#![allow(dead_code)]
pub mod middleware;
pub mod structs;
pub mod utility;

pub const GOOGLE_MAPS_SEARCH_ENDPOINT: &str = "https://www.google.com/maps/search/?api=1&query=";
